//! Integration specifications for the NATCAT underwriting pipeline.
//!
//! Scenarios exercise the public pipeline facade and HTTP router end to end:
//! scoring, decision routing, degraded-evaluator behavior, and response
//! mapping, without reaching into private modules.

mod common {
    use std::sync::Arc;

    use async_trait::async_trait;

    use insuriq::workflows::underwriting::{
        ConstructionType, EvaluationError, EvaluatorRegistry, HazardAssessment, HazardEvaluator,
        HazardKind, NormalizedProperty, PropertyInput, PropertyType, ProviderError, RiskWeights,
        StaticGazetteer, StaticGuidelineLibrary, UnderwritingConfig, UnderwritingPipeline,
    };

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

    pub(super) struct ScriptedEvaluator {
        kind: HazardKind,
        score: f64,
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
            Ok(HazardAssessment::bounded(self.score, 0.9))
        }
    }

    pub(super) struct FailingEvaluator {
        kind: HazardKind,
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
                "claims warehouse offline".to_string(),
            )))
        }
    }

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

    pub(super) fn scripted_registry(
        scores: &[(HazardKind, f64)],
        failing: Option<HazardKind>,
    ) -> EvaluatorRegistry {
        let weights = RiskWeights::default();
        let entries = scores
            .iter()
            .map(|(kind, score)| {
                let evaluator: Arc<dyn HazardEvaluator> = if Some(*kind) == failing {
                    Arc::new(FailingEvaluator { kind: *kind })
                } else {
                    Arc::new(ScriptedEvaluator {
                        kind: *kind,
                        score: *score,
                    })
                };
                (*kind, weights.weight_for(*kind), evaluator)
            })
            .collect();
        EvaluatorRegistry::new(entries).expect("default weights sum to 1.0")
    }

    pub(super) fn build_pipeline(registry: EvaluatorRegistry) -> UnderwritingPipeline {
        UnderwritingPipeline::new(
            Arc::new(registry),
            Arc::new(StaticGazetteer),
            Arc::new(StaticGuidelineLibrary),
            UnderwritingConfig::default(),
        )
    }
}

mod scenario {
    use super::common::*;
    use insuriq::workflows::underwriting::{DecisionStatus, HazardKind};

    #[tokio::test]
    async fn high_flood_exposure_is_referred() {
        let pipeline = build_pipeline(scripted_registry(&scenario_scores(4.0), None));

        let result = pipeline.run(property_input()).await.expect("run completes");

        assert!((result.composite_score - 55.0).abs() < 1e-9);
        assert_eq!(result.decision.status, DecisionStatus::Referred);
        assert_eq!(result.risk_scores.score(HazardKind::Flood), 4.0);
        assert!(result.report.contains("Underwriting Decision: Referred"));
    }

    #[tokio::test]
    async fn low_flood_exposure_goes_straight_through() {
        let pipeline = build_pipeline(scripted_registry(&scenario_scores(1.0), None));

        let result = pipeline.run(property_input()).await.expect("run completes");

        assert!((result.composite_score - 37.0).abs() < 1e-9);
        assert_eq!(result.decision.status, DecisionStatus::Stp);
        assert!(result.report.contains("Underwriting Decision: STP"));
    }

    #[tokio::test]
    async fn reports_are_reproducible_for_identical_inputs() {
        let pipeline = build_pipeline(scripted_registry(&scenario_scores(4.0), None));

        let first = pipeline.run(property_input()).await.expect("first run");
        let second = pipeline.run(property_input()).await.expect("second run");

        assert_eq!(first.report, second.report);
    }
}

mod degradation {
    use super::common::*;
    use insuriq::workflows::underwriting::HazardKind;

    #[tokio::test]
    async fn claims_outage_still_yields_a_decision_and_report() {
        let pipeline = build_pipeline(scripted_registry(
            &scenario_scores(4.0),
            Some(HazardKind::Claims),
        ));

        let result = pipeline.run(property_input()).await.expect("run completes");

        assert_eq!(result.risk_scores.score(HazardKind::Claims), 0.0);
        assert_eq!(result.evaluation_failures.len(), 1);
        assert_eq!(result.evaluation_failures[0].hazard, HazardKind::Claims);
        assert!(result.report.contains("- Claims: 0.0/5"));
        assert!(result.report.contains("Degraded hazards"));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use insuriq::workflows::underwriting::underwriting_router;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let pipeline = Arc::new(build_pipeline(scripted_registry(&scenario_scores(4.0), None)));
        underwriting_router(pipeline)
    }

    #[tokio::test]
    async fn post_assessment_returns_decision_payload() {
        let router = build_router();

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/underwriting/assessments")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&property_input()).expect("serialize input"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");

        assert_eq!(
            payload.get("property_id").and_then(Value::as_str),
            Some("PROP-123")
        );
        let composite = payload
            .get("composite_score")
            .and_then(Value::as_f64)
            .expect("composite present");
        assert!((composite - 55.0).abs() < 1e-9);
        assert_eq!(
            payload
                .pointer("/decision/status")
                .and_then(Value::as_str),
            Some("Referred")
        );
        assert!(payload.get("report").is_some());
    }

    #[tokio::test]
    async fn invalid_year_built_maps_to_unprocessable_entity() {
        let router = build_router();

        let mut input = property_input();
        input.year_built = 1492;

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/underwriting/assessments")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&input).expect("serialize input"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("year built"));
    }

    #[tokio::test]
    async fn unresolvable_address_maps_to_bad_gateway() {
        let router = build_router();

        let mut input = property_input();
        input.address = "1 Nowhere Lane, Atlantis".to_string();

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/underwriting/assessments")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&input).expect("serialize input"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
