use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use crate::workflows::underwriting::providers::ClaimsStore;

const SEARCH_RADIUS_KM: f64 = 5.0;
const LOOKBACK_YEARS: u32 = 5;

/// Recent claim density around the property, capped at the scale maximum.
pub struct ClaimsRiskEvaluator {
    store: Arc<dyn ClaimsStore>,
}

impl ClaimsRiskEvaluator {
    pub fn new(store: Arc<dyn ClaimsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HazardEvaluator for ClaimsRiskEvaluator {
    fn hazard(&self) -> HazardKind {
        HazardKind::Claims
    }

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        let claim_count = self
            .store
            .claims_within(property.coordinates, SEARCH_RADIUS_KM, LOOKBACK_YEARS)
            .await?;

        Ok(HazardAssessment::bounded(f64::from(claim_count), 0.9)
            .with_factor("nearby_claims", f64::from(claim_count))
            .with_raw("claim_count", json!(claim_count)))
    }
}
