//! Solver client error types.

use std::fmt;

/// Errors from the VRPTW solver HTTP client.
#[derive(Debug)]
pub enum SolverError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Solver reply could not be parsed
    Json { message: String },

    /// Solver returned an error status code
    ApiError { status: u16, message: String },

    /// Client-side configuration problem (bad base URL, etc.)
    NotConfigured(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Http(e) => write!(f, "HTTP error: {e}"),
            SolverError::Json { message } => write!(f, "solver reply parse error: {message}"),
            SolverError::ApiError { status, message } => {
                write!(f, "solver error {status}: {message}")
            }
            SolverError::NotConfigured(msg) => write!(f, "solver not configured: {msg}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SolverError {
    fn from(err: reqwest::Error) -> Self {
        SolverError::Http(err)
    }
}
