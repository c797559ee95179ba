use super::domain::{Decision, EvaluationFailure, HazardKind, RiskScoreSet};

/// Render the underwriting report.
///
/// Deterministic, side-effect-free string template: all six hazard kinds (a
/// missing or failed hazard prints as 0.0), the composite to one decimal
/// place, the decision with its reason, audit lines for degraded hazards, and
/// the guideline excerpt when one was retrieved.
pub fn render(
    composite_score: f64,
    scores: &RiskScoreSet,
    decision: &Decision,
    failures: &[EvaluationFailure],
    guideline_excerpts: &[String],
) -> String {
    let mut report = String::new();

    report.push_str(&format!("NATCAT Score: {composite_score:.1}/100\n"));
    report.push_str("Risk Breakdown:\n");
    for hazard in HazardKind::ordered() {
        report.push_str(&format!(
            "- {}: {:.1}/5\n",
            hazard.display_name(),
            scores.score(hazard)
        ));
    }

    report.push_str(&format!(
        "\nUnderwriting Decision: {}\nReason: {}\n",
        decision.status.label(),
        decision.reason
    ));

    if !failures.is_empty() {
        report.push_str("\nDegraded hazards (scored 0.0):\n");
        for failure in failures {
            report.push_str(&format!(
                "- {}: {}\n",
                failure.hazard.display_name(),
                failure.cause
            ));
        }
    }

    if !guideline_excerpts.is_empty() {
        report.push_str("\nGuidelines Reference:\n");
        report.push_str(&guideline_excerpts.join("\n\n"));
        report.push('\n');
    }

    report
}
