// src/error.rs
// Standardized error types for llm-expert

use std::time::Duration;
use thiserror::Error;

/// Coarse classification used by the page and the JSON API to pick a message
/// and a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    UnknownPersona,
    Upstream,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Validation => "validation",
            ErrorKind::UnknownPersona => "unknown_persona",
            ErrorKind::Upstream => "upstream",
        }
    }
}

/// Main error type for the llm-expert library
#[derive(Error, Debug)]
pub enum ExpertError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    #[error("model API error: {0}")]
    Upstream(String),

    #[error("model API call timed out after {:?}", .0)]
    Timeout(Duration),

    #[error("model API call cancelled")]
    Cancelled,
}

/// Convenience type alias for Result using ExpertError
pub type Result<T> = std::result::Result<T, ExpertError>;

impl ExpertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpertError::Config(_) => ErrorKind::Configuration,
            ExpertError::Validation(_) => ErrorKind::Validation,
            ExpertError::UnknownPersona(_) => ErrorKind::UnknownPersona,
            ExpertError::Upstream(_) | ExpertError::Timeout(_) | ExpertError::Cancelled => {
                ErrorKind::Upstream
            }
        }
    }

    /// Convert to user-facing string for the page and API boundaries
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ExpertError {
    fn from(err: reqwest::Error) -> Self {
        ExpertError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for ExpertError {
    fn from(err: serde_json::Error) -> Self {
        ExpertError::Upstream(format!("invalid response body: {}", err))
    }
}
