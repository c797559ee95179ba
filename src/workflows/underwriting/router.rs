use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::PropertyInput;
use super::pipeline::{PipelineError, UnderwritingPipeline};

/// Router builder exposing the underwriting assessment endpoint.
pub fn underwriting_router(pipeline: Arc<UnderwritingPipeline>) -> Router {
    Router::new()
        .route(
            "/api/v1/underwriting/assessments",
            post(assessment_handler),
        )
        .with_state(pipeline)
}

pub(crate) async fn assessment_handler(
    State(pipeline): State<Arc<UnderwritingPipeline>>,
    axum::Json(input): axum::Json<PropertyInput>,
) -> Response {
    match pipeline.run(input).await {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(PipelineError::Validation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(PipelineError::Geocode(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
