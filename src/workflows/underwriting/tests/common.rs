use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::workflows::underwriting::config::{RiskWeights, UnderwritingConfig};
use crate::workflows::underwriting::domain::{
    ConstructionType, Coordinates, HazardAssessment, HazardKind, NormalizedProperty,
    PropertyInput, PropertyType,
};
use crate::workflows::underwriting::evaluators::{EvaluationError, HazardEvaluator};
use crate::workflows::underwriting::geocode::StaticGazetteer;
use crate::workflows::underwriting::guidelines::{GuidelineRetriever, StaticGuidelineLibrary};
use crate::workflows::underwriting::pipeline::UnderwritingPipeline;
use crate::workflows::underwriting::providers::{HazardCatalog, ProviderError, WindProfile};
use crate::workflows::underwriting::registry::EvaluatorRegistry;

pub(super) fn property_input() -> PropertyInput {
    PropertyInput {
        property_id: "PROP-123".to_string(),
        property_type: PropertyType::Residential,
        address: "123 Main St, Los Angeles, CA".to_string(),
        construction_type: ConstructionType::Wood,
        year_built: 1990,
        floors: 2,
        has_basement: true,
    }
}

pub(super) fn underwriting_config() -> UnderwritingConfig {
    UnderwritingConfig::default()
}

pub(super) fn normalized_property() -> NormalizedProperty {
    NormalizedProperty::from_input(
        property_input(),
        Coordinates {
            latitude: 34.0522,
            longitude: -118.2437,
        },
    )
}

/// Evaluator double returning a fixed assessment.
pub(super) struct ScriptedEvaluator {
    pub(super) kind: HazardKind,
    pub(super) score: f64,
    pub(super) confidence: f64,
}

impl ScriptedEvaluator {
    pub(super) fn new(kind: HazardKind, score: f64) -> Self {
        Self {
            kind,
            score,
            confidence: 0.9,
        }
    }
}

#[async_trait]
impl HazardEvaluator for ScriptedEvaluator {
    fn hazard(&self) -> HazardKind {
        self.kind
    }

    async fn evaluate(
        &self,
        _property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        Ok(HazardAssessment::bounded(self.score, self.confidence)
            .with_factor("scripted_score", self.score))
    }
}

/// Evaluator double that always fails at its boundary.
pub(super) struct FailingEvaluator {
    pub(super) kind: HazardKind,
}

#[async_trait]
impl HazardEvaluator for FailingEvaluator {
    fn hazard(&self) -> HazardKind {
        self.kind
    }

    async fn evaluate(
        &self,
        _property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        Err(EvaluationError::Upstream(ProviderError::Unavailable(
            "simulated outage".to_string(),
        )))
    }
}

/// Evaluator double that sleeps past any reasonable timeout.
pub(super) struct SlowEvaluator {
    pub(super) kind: HazardKind,
}

#[async_trait]
impl HazardEvaluator for SlowEvaluator {
    fn hazard(&self) -> HazardKind {
        self.kind
    }

    async fn evaluate(
        &self,
        _property: &NormalizedProperty,
    ) -> Result<HazardAssessment, EvaluationError> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok(HazardAssessment::bounded(5.0, 1.0))
    }
}

/// Hazard catalog whose wildfire lookup is down but whose wind data works.
pub(super) struct BrokenWildfireCatalog;

#[async_trait]
impl HazardCatalog for BrokenWildfireCatalog {
    async fn wildfire_score(&self, _coordinates: Coordinates) -> Result<f64, ProviderError> {
        Err(ProviderError::Unavailable("catalog offline".to_string()))
    }

    async fn wind_profile(&self, _coordinates: Coordinates) -> Result<WindProfile, ProviderError> {
        Ok(WindProfile {
            hurricane: 50.0,
            tornado: 60.0,
            hail: 30.0,
        })
    }
}

/// Guideline retriever double that is always unavailable.
pub(super) struct FailingGuidelines;

#[async_trait]
impl GuidelineRetriever for FailingGuidelines {
    async fn retrieve(&self, _query: &str) -> Result<Vec<String>, ProviderError> {
        Err(ProviderError::Unavailable("retriever offline".to_string()))
    }
}

/// Registry of scripted evaluators using the default weights, in canonical
/// order.
pub(super) fn scripted_registry(scores: &[(HazardKind, f64)]) -> EvaluatorRegistry {
    let weights = RiskWeights::default();
    let entries = scores
        .iter()
        .map(|(kind, score)| {
            (
                *kind,
                weights.weight_for(*kind),
                Arc::new(ScriptedEvaluator::new(*kind, *score)) as Arc<dyn HazardEvaluator>,
            )
        })
        .collect();
    EvaluatorRegistry::new(entries).expect("default weights sum to 1.0")
}

/// Reference scenario: fire 3.2, flood as given, windstorm 2.0,
/// earthquake 1.0, construction 2.0, claims 1.0.
pub(super) fn scenario_scores(flood: f64) -> Vec<(HazardKind, f64)> {
    vec![
        (HazardKind::Fire, 3.2),
        (HazardKind::Windstorm, 2.0),
        (HazardKind::Flood, flood),
        (HazardKind::Earthquake, 1.0),
        (HazardKind::Construction, 2.0),
        (HazardKind::Claims, 1.0),
    ]
}

pub(super) fn build_pipeline(
    registry: EvaluatorRegistry,
    config: UnderwritingConfig,
) -> UnderwritingPipeline {
    UnderwritingPipeline::new(
        Arc::new(registry),
        Arc::new(StaticGazetteer),
        Arc::new(StaticGuidelineLibrary),
        config,
    )
}
