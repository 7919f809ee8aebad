use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::debug;

/// Client-facing error rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, detail = %self.detail, "request rejected");
        (self.status, Json(serde_json::json!({"detail": self.detail}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Conflict(_) => Self::new(StatusCode::BAD_REQUEST, "Item already exists"),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Item not found"),
            ServiceError::Validation(msg) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let conflict: ApiError = ServiceError::already_exists("item").into();
        assert_eq!(conflict.status, StatusCode::BAD_REQUEST);
        assert_eq!(conflict.detail, "Item already exists");

        let missing: ApiError = ServiceError::not_found("item").into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.detail, "Item not found");

        let invalid: ApiError = ServiceError::Validation("field `price` must be a number".into()).into();
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.detail, "field `price` must be a number");
    }
}
