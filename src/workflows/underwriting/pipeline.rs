use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use futures::future::join_all;
use tokio::time::timeout;
use tracing::{info, warn};

use super::aggregation;
use super::config::{GeocodeFallback, UnderwritingConfig};
use super::domain::{
    Coordinates, EvaluationFailure, HazardAssessment, HazardKind, NormalizedProperty,
    PipelineResult, PropertyInput, RiskScoreSet,
};
use super::geocode::{GeocodeError, Geocoder, SENTINEL_COORDINATES};
use super::guidelines::GuidelineRetriever;
use super::policy;
use super::registry::EvaluatorRegistry;
use super::report;

const EARLIEST_YEAR_BUILT: i32 = 1800;

const GUIDELINE_QUERY: &str = "Property underwriting guidelines";

/// Input rejection raised before any I/O. Terminal; never retried.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("year built {year_built} outside accepted range {min}..={max}")]
    YearBuiltOutOfRange { year_built: i32, min: i32, max: i32 },
    #[error("floor count must be at least 1")]
    NoFloors,
    #[error("address must not be blank")]
    BlankAddress,
}

/// Early-abort failures of a pipeline run. Hazard-evaluation failures are
/// absorbed into the result and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Orchestrates one underwriting run:
/// validate -> normalize -> geocode -> hazard fan-out -> aggregate -> decide
/// -> report.
///
/// The hazard fan-out is the only point of parallelism. Evaluator futures are
/// joined, not spawned, so dropping a `run` future cancels every in-flight
/// evaluator call and discards partial results.
pub struct UnderwritingPipeline {
    registry: Arc<EvaluatorRegistry>,
    geocoder: Arc<dyn Geocoder>,
    guidelines: Arc<dyn GuidelineRetriever>,
    config: UnderwritingConfig,
}

impl UnderwritingPipeline {
    pub fn new(
        registry: Arc<EvaluatorRegistry>,
        geocoder: Arc<dyn Geocoder>,
        guidelines: Arc<dyn GuidelineRetriever>,
        config: UnderwritingConfig,
    ) -> Self {
        Self {
            registry,
            geocoder,
            guidelines,
            config,
        }
    }

    pub fn config(&self) -> &UnderwritingConfig {
        &self.config
    }

    pub fn registry(&self) -> &EvaluatorRegistry {
        &self.registry
    }

    /// Run the full pipeline for one property.
    ///
    /// A completed run always carries a decision and report, even when
    /// individual hazard evaluations failed; only validation and geocoding
    /// abort early.
    pub async fn run(&self, input: PropertyInput) -> Result<PipelineResult, PipelineError> {
        validate(&input)?;

        let coordinates = self.resolve_coordinates(&input.address).await?;
        let property = NormalizedProperty::from_input(input, coordinates);
        info!(
            property_id = %property.property_id,
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "property normalized and geocoded"
        );

        let (assessments, evaluation_failures) = self.evaluate_hazards(&property).await;
        let risk_scores: RiskScoreSet = assessments
            .iter()
            .map(|(hazard, assessment)| (*hazard, assessment.score))
            .collect();

        let composite_score = aggregation::composite_score(&risk_scores, &self.registry);
        let decision = policy::decide(composite_score, self.config.stp_threshold);

        let guideline_excerpts = match timeout(
            self.config.evaluator_timeout(),
            self.guidelines.retrieve(GUIDELINE_QUERY),
        )
        .await
        {
            Ok(Ok(excerpts)) => excerpts,
            Ok(Err(err)) => {
                warn!(error = %err, "guideline retrieval unavailable, continuing without excerpt");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.evaluator_timeout_ms,
                    "guideline retrieval timed out, continuing without excerpt"
                );
                Vec::new()
            }
        };

        let report = report::render(
            composite_score,
            &risk_scores,
            &decision,
            &evaluation_failures,
            &guideline_excerpts,
        );

        info!(
            property_id = %property.property_id,
            composite_score,
            status = decision.status.label(),
            degraded_hazards = evaluation_failures.len(),
            "underwriting run complete"
        );

        Ok(PipelineResult {
            property_id: property.property_id,
            coordinates,
            risk_scores,
            assessments,
            composite_score,
            decision,
            evaluation_failures,
            report,
        })
    }

    async fn resolve_coordinates(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let resolved = match timeout(self.config.geocode_timeout(), self.geocoder.geocode(address))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(GeocodeError::TimedOut(self.config.geocode_timeout_ms)),
        };

        match resolved {
            Ok(coordinates) => Ok(coordinates),
            Err(err) => match self.config.geocode_fallback {
                GeocodeFallback::Enabled => {
                    warn!(error = %err, "geocoding failed, substituting sentinel coordinate");
                    Ok(SENTINEL_COORDINATES)
                }
                GeocodeFallback::Disabled => Err(err),
            },
        }
    }

    /// Dispatch every registered evaluator concurrently and wait for all of
    /// them to resolve. A failing or timed-out evaluator contributes an audit
    /// entry instead of a score; it never aborts the run.
    async fn evaluate_hazards(
        &self,
        property: &NormalizedProperty,
    ) -> (BTreeMap<HazardKind, HazardAssessment>, Vec<EvaluationFailure>) {
        let deadline = self.config.evaluator_timeout();

        let outcomes = join_all(self.registry.entries().iter().map(|entry| {
            let hazard = entry.hazard;
            let evaluator = entry.evaluator.clone();
            async move {
                let outcome = timeout(deadline, evaluator.evaluate(property)).await;
                (hazard, outcome)
            }
        }))
        .await;

        let mut assessments = BTreeMap::new();
        let mut failures = Vec::new();
        for (hazard, outcome) in outcomes {
            match outcome {
                Ok(Ok(assessment)) => {
                    assessments.insert(hazard, assessment);
                }
                Ok(Err(err)) => {
                    warn!(hazard = %hazard, error = %err, "hazard evaluation failed, scoring 0");
                    failures.push(EvaluationFailure {
                        hazard,
                        cause: err.to_string(),
                    });
                }
                Err(_) => {
                    warn!(
                        hazard = %hazard,
                        timeout_ms = self.config.evaluator_timeout_ms,
                        "hazard evaluation timed out, scoring 0"
                    );
                    failures.push(EvaluationFailure {
                        hazard,
                        cause: format!("timed out after {} ms", self.config.evaluator_timeout_ms),
                    });
                }
            }
        }

        (assessments, failures)
    }
}

pub(crate) fn validate(input: &PropertyInput) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    if input.year_built < EARLIEST_YEAR_BUILT || input.year_built > current_year {
        return Err(ValidationError::YearBuiltOutOfRange {
            year_built: input.year_built,
            min: EARLIEST_YEAR_BUILT,
            max: current_year,
        });
    }
    if input.floors == 0 {
        return Err(ValidationError::NoFloors);
    }
    if input.address.trim().is_empty() {
        return Err(ValidationError::BlankAddress);
    }
    Ok(())
}
