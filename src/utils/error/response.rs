//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};

impl GatewayError {
    /// Status code and stable error code for this error
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GatewayError::RateLimit { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
            GatewayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Build the JSON error response, tagging it with the request ID when known
    pub fn to_response(&self, request_id: Option<String>) -> HttpResponse {
        let (status_code, error_code) = self.classify();

        // Internal details stay in the logs
        let message = if status_code.is_server_error() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id,
                retry_after: self.retry_after(),
            },
        };

        let mut builder = HttpResponse::build(status_code);
        if let Some(retry_after) = self.retry_after() {
            builder.insert_header((header::RETRY_AFTER, retry_after.to_string()));
        }
        builder.json(error_response)
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response(None)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}
