// Error taxonomy surfaced to callers
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqiError {
    #[error("City name is required")]
    MissingInput,

    #[error("Start and End required")]
    MissingEndpoints,

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    UpstreamUnavailable {
        message: String,
        /// Provider response body, forwarded when it was JSON.
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    Internal(String),
}

impl AqiError {
    pub fn upstream(message: impl Into<String>) -> Self {
        AqiError::UpstreamUnavailable {
            message: message.into(),
            details: None,
        }
    }
}
