use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use crate::workflows::underwriting::providers::FloodZoneMap;

const BASEMENT_PENALTY: f64 = 1.5;

/// Flood-zone base score scaled by the basement penalty.
pub struct FloodRiskEvaluator {
    zones: Arc<dyn FloodZoneMap>,
}

impl FloodRiskEvaluator {
    pub fn new(zones: Arc<dyn FloodZoneMap>) -> Self {
        Self { zones }
    }
}

#[async_trait]
impl HazardEvaluator for FloodRiskEvaluator {
    fn hazard(&self) -> HazardKind {
        HazardKind::Flood
    }

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        let zone = self.zones.flood_zone(property.coordinates).await?;

        let penalty = if property.has_basement {
            BASEMENT_PENALTY
        } else {
            1.0
        };
        let score = zone.base_score() * penalty;

        Ok(HazardAssessment::bounded(score, 0.85)
            .with_factor("zone_score", zone.base_score())
            .with_factor("basement_penalty", penalty)
            .with_raw("flood_zone", json!(zone.designation())))
    }
}
