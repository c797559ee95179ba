use super::domain::RiskScoreSet;
use super::registry::EvaluatorRegistry;

/// Maps the weighted 0-5 hazard sum onto the 0-100 composite scale.
pub const COMPOSITE_SCALE: f64 = 20.0;

/// Weighted composite NATCAT score.
///
/// Pure and total: every registered hazard contributes `weight * score`, with
/// a missing score reading as 0.0 (the documented degraded-evaluator policy).
/// Summation runs in registry order so identical inputs reproduce identical
/// floating-point results.
pub fn composite_score(scores: &RiskScoreSet, registry: &EvaluatorRegistry) -> f64 {
    registry
        .entries()
        .iter()
        .map(|entry| entry.weight * scores.score(entry.hazard))
        .sum::<f64>()
        * COMPOSITE_SCALE
}
