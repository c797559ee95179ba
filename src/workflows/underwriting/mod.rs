//! NATCAT underwriting workflow: normalize a property submission, geocode it,
//! fan out to the per-hazard evaluators, aggregate the weighted composite
//! score, and route the decision.

pub mod aggregation;
pub mod config;
pub mod domain;
pub mod evaluators;
pub mod geocode;
pub mod guidelines;
pub mod pipeline;
pub mod policy;
pub mod providers;
pub mod registry;
pub mod report;
pub mod router;

#[cfg(test)]
mod tests;

pub use config::{GeocodeFallback, RiskWeights, UnderwritingConfig};
pub use domain::{
    ConstructionType, Coordinates, Decision, DecisionStatus, EvaluationFailure, HazardAssessment,
    HazardKind, NormalizedProperty, PipelineResult, PropertyInput, PropertyType, RiskScoreSet,
};
pub use evaluators::{EvaluationError, HazardEvaluator};
pub use geocode::{GeocodeError, Geocoder, StaticGazetteer, SENTINEL_COORDINATES};
pub use guidelines::{GuidelineRetriever, StaticGuidelineLibrary};
pub use pipeline::{PipelineError, UnderwritingPipeline, ValidationError};
pub use providers::{ProviderError, ProviderSet};
pub use registry::{ConfigError, EvaluatorRegistry, RegisteredEvaluator};
pub use router::underwriting_router;
