use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>, "field": <name>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
    pub field: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail, field: None }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.error });
        if let Some(detail) = self.detail {
            body["detail"] = serde_json::Value::String(detail);
        }
        if let Some(field) = self.field {
            body["field"] = serde_json::Value::String(field);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(ref m) => {
                JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.to_string()))
                    .with_field(m.field())
            }
            ServiceError::NotFound(_) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
            }
            ServiceError::Io(_) | ServiceError::Encode(_) => {
                error!(error = %e, "item store write failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_http_status() {
        let v: JsonApiError = ServiceError::Model(ModelError::validation("price", "must be greater than 0")).into();
        assert_eq!(v.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(v.field.as_deref(), Some("price"));

        let nf: JsonApiError = ServiceError::NotFound(99).into();
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.detail.as_deref(), Some("Item with ID 99 not found"));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let ie: JsonApiError = ServiceError::Io(io).into();
        assert_eq!(ie.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ie.field, None);
    }

    #[test]
    fn response_carries_status() {
        let res = JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
