use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use crate::workflows::underwriting::providers::SeismicService;

const PGA_MULTIPLIER: f64 = 5.0;

/// Peak ground acceleration scaled onto the hazard range.
pub struct EarthquakeRiskEvaluator {
    seismic: Arc<dyn SeismicService>,
}

impl EarthquakeRiskEvaluator {
    pub fn new(seismic: Arc<dyn SeismicService>) -> Self {
        Self { seismic }
    }
}

#[async_trait]
impl HazardEvaluator for EarthquakeRiskEvaluator {
    fn hazard(&self) -> HazardKind {
        HazardKind::Earthquake
    }

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        let pga = self
            .seismic
            .peak_ground_acceleration(property.coordinates)
            .await?;

        let score = pga.max(0.0) * PGA_MULTIPLIER;

        Ok(HazardAssessment::bounded(score, 0.75)
            .with_factor("pga", pga)
            .with_raw("pga", json!(pga)))
    }
}
