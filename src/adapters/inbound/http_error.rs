//! HTTP Error Mapping
//!
//! The one place where an error kind becomes a wire status code.

use crate::domain::errors::{AppError, ErrorKind};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Map an error kind to its HTTP status.
pub fn status_code(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Only the user-facing message is serialized; the wrapped cause stays
/// server-side.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_code(self.kind());
        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_code_table() {
        assert_eq!(status_code(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_code(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_code(ErrorKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_into_response() {
        let response = AppError::validation("invalid IP address: nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "invalid IP address: nope"})
        );
    }

    #[tokio::test]
    async fn test_not_found_into_response() {
        let response = AppError::not_found("Resource not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_internal_into_response_strips_cause() {
        let err = AppError::internal_with_source(
            "failed to resolve country for IP address",
            io::Error::new(io::ErrorKind::Other, "mmdb offset out of range"),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "failed to resolve country for IP address");
        assert!(!body.to_string().contains("mmdb offset"));
    }
}
