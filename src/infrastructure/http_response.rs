// HTTP response utilities for error reporting
use crate::domain::error::AqiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AqiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AqiError::MissingInput | AqiError::MissingEndpoints => StatusCode::BAD_REQUEST,
            AqiError::NotFound(_) => StatusCode::NOT_FOUND,
            AqiError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AqiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AqiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let error = self.to_string();
        let details = match self {
            AqiError::UpstreamUnavailable { details, .. } => details,
            _ => None,
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Body for handler panics caught by the panic layer.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AqiError::Internal(message).into_response()
}
