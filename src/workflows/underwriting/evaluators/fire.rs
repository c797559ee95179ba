use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::domain::{HazardAssessment, HazardKind, NormalizedProperty};
use crate::workflows::underwriting::providers::{FireStationLocator, HazardCatalog};

const PROXIMITY_WEIGHT: f64 = 0.4;
const WILDFIRE_WEIGHT: f64 = 0.4;
const CATALOG_SCALE: f64 = 20.0;

/// Blends fire-station proximity with the catalog's wildfire score, scaled by
/// the construction-type multiplier.
pub struct FireRiskEvaluator {
    stations: Arc<dyn FireStationLocator>,
    catalog: Arc<dyn HazardCatalog>,
}

impl FireRiskEvaluator {
    pub fn new(stations: Arc<dyn FireStationLocator>, catalog: Arc<dyn HazardCatalog>) -> Self {
        Self { stations, catalog }
    }
}

#[async_trait]
impl HazardEvaluator for FireRiskEvaluator {
    fn hazard(&self) -> HazardKind {
        HazardKind::Fire
    }

    async fn evaluate(
        &self,
        property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        let distance_km = self
            .stations
            .nearest_station_km(property.coordinates)
            .await?;

        // A wildfire outage degrades the assessment rather than failing it:
        // the component defaults to 0 and confidence drops.
        let (wildfire_raw, confidence) = match self.catalog.wildfire_score(property.coordinates).await
        {
            Ok(raw) => (raw, 0.9),
            Err(err) => {
                tracing::warn!(error = %err, "wildfire lookup unavailable, scoring proximity only");
                (0.0, 0.7)
            }
        };

        // Normalize: distance saturates at 10 km, catalog scores are 0-100.
        let proximity_score = (distance_km / 10.0).clamp(0.0, 1.0) * 5.0;
        let wildfire_score = (wildfire_raw / CATALOG_SCALE).clamp(0.0, 5.0);
        let composite = (proximity_score * PROXIMITY_WEIGHT + wildfire_score * WILDFIRE_WEIGHT)
            * property.construction_factor;

        Ok(HazardAssessment::bounded(composite, confidence)
            .with_factor("fire_station_distance_km", distance_km)
            .with_factor("proximity_score", proximity_score)
            .with_factor("wildfire_score", wildfire_score)
            .with_factor("construction_factor", property.construction_factor)
            .with_raw("wildfire_raw", json!(wildfire_raw)))
    }
}
