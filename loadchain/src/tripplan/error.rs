//! Trip-plan client error types.

use std::fmt;

/// Errors from the trip-plan generation client.
#[derive(Debug)]
pub enum PlanError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Generation service returned an error status code
    ApiError { status: u16, message: String },

    /// The service replied without any generated text
    EmptyReply,

    /// Missing API key or other configuration problem
    NotConfigured(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Http(e) => write!(f, "HTTP error: {e}"),
            PlanError::ApiError { status, message } => {
                write!(f, "generation error {status}: {message}")
            }
            PlanError::EmptyReply => write!(f, "generation service returned no text"),
            PlanError::NotConfigured(msg) => write!(f, "trip plans not configured: {msg}"),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlanError {
    fn from(err: reqwest::Error) -> Self {
        PlanError::Http(err)
    }
}
