//! Per-hazard risk evaluators behind one capability trait.
//!
//! Each evaluator owns its upstream provider seam, converts every internal
//! failure into a typed [`EvaluationError`], and clamps its score into the
//! native 0-5 scale before returning. Scoring formulas are replaceable
//! business logic; the bounded-output contract is not.

mod claims;
mod construction;
mod earthquake;
mod fire;
mod flood;
mod windstorm;

pub use claims::ClaimsRiskEvaluator;
pub use construction::ConstructionRiskEvaluator;
pub use earthquake::EarthquakeRiskEvaluator;
pub use fire::FireRiskEvaluator;
pub use flood::FloodRiskEvaluator;
pub use windstorm::WindstormRiskEvaluator;

use async_trait::async_trait;

use super::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use super::providers::ProviderError;

/// Failure raised at an evaluator's boundary. The pipeline absorbs these into
/// the run's audit list; they never abort the run.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Upstream(#[from] ProviderError),
    #[error("required property field missing: {0}")]
    MissingData(&'static str),
}

/// Stateless per-hazard risk evaluator.
///
/// Implementations may perform I/O through their injected providers, must not
/// mutate the property or any shared state, and must return a score already
/// clamped into [0, 5] (use [`HazardAssessment::bounded`]).
#[async_trait]
pub trait HazardEvaluator: Send + Sync {
    fn hazard(&self) -> HazardKind;

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError>;
}
