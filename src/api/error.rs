// API Errors
// Maps boundary failures onto HTTP status codes with a JSON `{"error": ...}` body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;
use crate::services::AnalysisError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Required input absent or unreadable. The scorer is never invoked.
    #[error("{0}")]
    ClientInput(String),
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Analysis(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ClientInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::ClientInput(msg) => warn!(status = status.as_u16(), "request.rejected: {}", msg),
            ApiError::Analysis(msg) => error!(status = status.as_u16(), "analysis.failed: {}", msg),
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::ClientInput("Missing required field: content".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        let err: ApiError = AnalysisError::InvalidPattern {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Analysis failed: invalid pattern"));
    }
}
