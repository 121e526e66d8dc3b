//! Error types for Quay API operations

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuayError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuayError {
    /// Request could not be built or the registry could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// Registry answered with an error payload
    #[error("Quay API error (status {status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response (status {status}): {message}")]
    Decode { status: StatusCode, message: String },

    /// List endpoint answered with a non-200 status and no error payload
    #[error("Unexpected status {status} while {operation}")]
    UnexpectedStatus {
        status: StatusCode,
        operation: &'static str,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuayError {
    pub fn decode(status: StatusCode, err: serde_json::Error) -> Self {
        QuayError::Decode {
            status,
            message: err.to_string(),
        }
    }

    /// HTTP status attached to the error, if the registry answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            QuayError::Api { status, .. }
            | QuayError::Decode { status, .. }
            | QuayError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message for `Api` errors
    pub fn message(&self) -> Option<&str> {
        match self {
            QuayError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<reqwest::Error> for QuayError {
    fn from(err: reqwest::Error) -> Self {
        QuayError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for QuayError {
    fn from(err: url::ParseError) -> Self {
        QuayError::InvalidUrl(err.to_string())
    }
}
