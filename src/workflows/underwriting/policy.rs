use super::domain::{Decision, DecisionStatus};

/// Routing decision from the composite score.
///
/// This single comparison is the entire business rule: scores strictly below
/// the threshold go straight through; the threshold itself and everything
/// above it is referred to manual review.
pub fn decide(composite_score: f64, stp_threshold: f64) -> Decision {
    if composite_score < stp_threshold {
        Decision {
            status: DecisionStatus::Stp,
            reason: format!(
                "composite NATCAT score {composite_score:.1} is below the referral threshold {stp_threshold:.1}"
            ),
        }
    } else {
        Decision {
            status: DecisionStatus::Referred,
            reason: format!(
                "composite NATCAT score {composite_score:.1} is at or above the referral threshold {stp_threshold:.1}"
            ),
        }
    }
}
