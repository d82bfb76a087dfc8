//! Error types for the banner service
//!
//! The cache itself never fails; these errors come from the persistence
//! layer, request validation, and the token check.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the banner service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Banner not found
    #[error("Banner not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Feature and tag pair already owned by another banner
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or unknown token
    #[error("Unauthorized")]
    Unauthorized,

    /// Token is valid but lacks the admin role
    #[error("Forbidden")]
    Forbidden,

    /// Persistence or other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the banner service.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServiceError::NotFound("1".into()), StatusCode::NOT_FOUND),
            (ServiceError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden, StatusCode::FORBIDDEN),
            (ServiceError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ServiceError::NotFound("feature 1, tag 2".into()).to_string(),
            "Banner not found: feature 1, tag 2"
        );
        assert_eq!(ServiceError::Unauthorized.to_string(), "Unauthorized");
    }
}
