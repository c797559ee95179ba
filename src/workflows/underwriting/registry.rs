use std::sync::Arc;

use super::config::RiskWeights;
use super::domain::HazardKind;
use super::evaluators::{
    ClaimsRiskEvaluator, ConstructionRiskEvaluator, EarthquakeRiskEvaluator, FireRiskEvaluator,
    FloodRiskEvaluator, HazardEvaluator, WindstormRiskEvaluator,
};
use super::providers::ProviderSet;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Construction-time configuration failure. Surfaced immediately, never at
/// runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("hazard weights must sum to 1.0, got {sum:.4}")]
    WeightSum { sum: f64 },
    #[error("duplicate evaluator registered for hazard '{0}'")]
    DuplicateHazard(HazardKind),
}

/// One registry slot: a hazard, its aggregation weight, and the evaluator.
#[derive(Clone)]
pub struct RegisteredEvaluator {
    pub hazard: HazardKind,
    pub weight: f64,
    pub evaluator: Arc<dyn HazardEvaluator>,
}

/// Fixed ordered set of evaluators and their aggregation weights.
///
/// Iteration order is insertion order and is the order used for summation and
/// reporting, so identical inputs reproduce identical reports.
pub struct EvaluatorRegistry {
    entries: Vec<RegisteredEvaluator>,
}

impl EvaluatorRegistry {
    /// Build a registry, validating that weights sum to 1.0 and no hazard is
    /// registered twice.
    pub fn new(
        entries: Vec<(HazardKind, f64, Arc<dyn HazardEvaluator>)>,
    ) -> Result<Self, ConfigError> {
        let mut seen: Vec<HazardKind> = Vec::with_capacity(entries.len());
        for (hazard, _, _) in &entries {
            if seen.contains(hazard) {
                return Err(ConfigError::DuplicateHazard(*hazard));
            }
            seen.push(*hazard);
        }

        let sum: f64 = entries.iter().map(|(_, weight, _)| weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        let entries = entries
            .into_iter()
            .map(|(hazard, weight, evaluator)| RegisteredEvaluator {
                hazard,
                weight,
                evaluator,
            })
            .collect();

        Ok(Self { entries })
    }

    /// The standard six-hazard registry wired to the supplied providers, in
    /// canonical order.
    pub fn standard(providers: &ProviderSet, weights: &RiskWeights) -> Result<Self, ConfigError> {
        let entries: Vec<(HazardKind, f64, Arc<dyn HazardEvaluator>)> = vec![
            (
                HazardKind::Fire,
                weights.fire,
                Arc::new(FireRiskEvaluator::new(
                    providers.fire_stations.clone(),
                    providers.hazard_catalog.clone(),
                )),
            ),
            (
                HazardKind::Windstorm,
                weights.windstorm,
                Arc::new(WindstormRiskEvaluator::new(providers.hazard_catalog.clone())),
            ),
            (
                HazardKind::Flood,
                weights.flood,
                Arc::new(FloodRiskEvaluator::new(providers.flood_zones.clone())),
            ),
            (
                HazardKind::Earthquake,
                weights.earthquake,
                Arc::new(EarthquakeRiskEvaluator::new(providers.seismic.clone())),
            ),
            (
                HazardKind::Construction,
                weights.construction,
                Arc::new(ConstructionRiskEvaluator::new(
                    providers.property_records.clone(),
                )),
            ),
            (
                HazardKind::Claims,
                weights.claims,
                Arc::new(ClaimsRiskEvaluator::new(providers.claims.clone())),
            ),
        ];

        Self::new(entries)
    }

    pub fn entries(&self) -> &[RegisteredEvaluator] {
        &self.entries
    }

    pub fn weight(&self, hazard: HazardKind) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.hazard == hazard)
            .map(|entry| entry.weight)
    }

    pub fn evaluator(&self, hazard: HazardKind) -> Option<&Arc<dyn HazardEvaluator>> {
        self.entries
            .iter()
            .find(|entry| entry.hazard == hazard)
            .map(|entry| &entry.evaluator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
