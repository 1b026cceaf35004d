// HTTP API
// Thin boundary around the scorer: input checks, response shaping, CORS

pub mod error;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse, SampleAnalysisResponse};
use crate::services::detection::{FraudDetector, SAMPLE_INTERPRETATION};
use crate::services::ContentInput;

pub use error::ApiError;

pub const SERVICE_NAME: &str = "Veridity Fraud Detection API";

pub fn router(detector: Arc<FraudDetector>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze_paper))
        .route("/test", get(test_endpoint))
        .layer(CorsLayer::permissive())
        .with_state(detector)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze_paper(
    State(detector): State<Arc<FraudDetector>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::ClientInput(format!("Invalid JSON body: {}", e.body_text())))?;

    let AnalyzeRequest { content, metadata } = AnalyzeRequest::from_body(body)
        .ok_or_else(|| ApiError::ClientInput("Missing required field: content".to_string()))?;
    let content = ContentInput::from_json(&content);

    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id);

    // Scoring is CPU-only; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        span.in_scope(|| {
            let result = detector.analyze(&content, &metadata);
            info!(
                statistical_flags = result.analysis_details.statistical_flags,
                text_flags = result.analysis_details.text_flags,
                content_length = result.analysis_details.content_length,
                overall_score = result.overall_score,
                "analysis.completed"
            );
            result
        })
    })
    .await?;

    Ok(Json(AnalyzeResponse::from(result)))
}

async fn test_endpoint(State(detector): State<Arc<FraudDetector>>) -> Json<SampleAnalysisResponse> {
    Json(SampleAnalysisResponse {
        sample_analysis: detector.analyze_sample(),
        interpretation: SAMPLE_INTERPRETATION.to_string(),
    })
}
