use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use crate::workflows::underwriting::providers::HazardCatalog;

const CATALOG_SCALE: f64 = 20.0;

/// Worst of the hurricane, tornado, and hail component scores.
pub struct WindstormRiskEvaluator {
    catalog: Arc<dyn HazardCatalog>,
}

impl WindstormRiskEvaluator {
    pub fn new(catalog: Arc<dyn HazardCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl HazardEvaluator for WindstormRiskEvaluator {
    fn hazard(&self) -> HazardKind {
        HazardKind::Windstorm
    }

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        let profile = self.catalog.wind_profile(property.coordinates).await?;

        let hurricane = (profile.hurricane / CATALOG_SCALE).clamp(0.0, 5.0);
        let tornado = (profile.tornado / CATALOG_SCALE).clamp(0.0, 5.0);
        let hail = (profile.hail / CATALOG_SCALE).clamp(0.0, 5.0);
        let score = hurricane.max(tornado).max(hail);

        Ok(HazardAssessment::bounded(score, 0.8)
            .with_factor("hurricane", hurricane)
            .with_factor("tornado", tornado)
            .with_factor("hail", hail)
            .with_raw(
                "wind_profile",
                json!({
                    "hurricane": profile.hurricane,
                    "tornado": profile.tornado,
                    "hail": profile.hail,
                }),
            ))
    }
}
