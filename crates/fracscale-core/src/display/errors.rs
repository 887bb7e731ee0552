//! Display service error types.

use crate::errors::FracscaleError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to connect to the session bus: {message}")]
    ConnectionFailed { message: String },

    #[error("{method} failed: {message}")]
    CallFailed { method: String, message: String },

    #[error("{method} rejected by compositor ({name}): {message}")]
    Rejected {
        method: String,
        name: String,
        message: String,
    },

    #[error("Malformed display state: {message}")]
    MalformedState { message: String },
}

impl ServiceError {
    pub(crate) fn from_call(method: &str, error: zbus::Error) -> Self {
        match error {
            zbus::Error::MethodError(name, detail, _) => ServiceError::Rejected {
                method: method.to_string(),
                name: name.as_str().to_string(),
                message: detail.unwrap_or_default(),
            },
            other => ServiceError::CallFailed {
                method: method.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl FracscaleError for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            ServiceError::ConnectionFailed { .. } => "SERVICE_CONNECTION_FAILED",
            ServiceError::CallFailed { .. } => "SERVICE_CALL_FAILED",
            ServiceError::Rejected { .. } => "SERVICE_REJECTED",
            ServiceError::MalformedState { .. } => "SERVICE_MALFORMED_STATE",
        }
    }
}
