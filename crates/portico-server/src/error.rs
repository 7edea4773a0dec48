//! Error types for the API server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use portico_discovery::{BalanceError, RegistryError};
use portico_gateway::RouteError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur in the API server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Resource not found.
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Invalid request parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// No healthy service satisfied the request.
    #[error("no suitable service available")]
    NoSuitableService,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Uniform JSON error body: `{success:false, error, code}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound(_, _) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::NoSuitableService => (StatusCode::NOT_FOUND, "no_suitable_service"),
            Self::BindFailed(_, _) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"success":false,"error":"failed to serialize error","code":"internal_error"}"#
                .to_string()
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::NotFound("service".to_string(), id),
            RegistryError::InvalidRegistration(msg) => Self::Validation(msg),
        }
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NoSuitableService => Self::NoSuitableService,
        }
    }
}

impl From<BalanceError> for ApiError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::NoneAvailable => Self::NoSuitableService,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_not_found_error_response() {
        let err = ApiError::NotFound("service".to_string(), "svc-a".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "not_found");
        assert!(json["error"].as_str().unwrap().contains("svc-a"));
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let err = ApiError::Validation("serviceId cannot be empty".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_no_suitable_service_response() {
        let response = ApiError::NoSuitableService.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "no_suitable_service");
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let err = ApiError::Internal("something broke".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_registry_error() {
        let err = ApiError::from(RegistryError::NotFound("svc-a".to_string()));
        assert!(matches!(err, ApiError::NotFound(_, _)));

        let err = ApiError::from(RegistryError::InvalidRegistration("empty".to_string()));
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_from_route_error() {
        let err = ApiError::from(RouteError::NoSuitableService);
        assert!(matches!(err, ApiError::NoSuitableService));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("service".to_string(), "svc-a".to_string());
        assert_eq!(err.to_string(), "service not found: svc-a");
    }
}
