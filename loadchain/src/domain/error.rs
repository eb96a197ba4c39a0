//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from search errors and from collaborator/IO errors.

use super::LoadId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or not finite
    #[error("latitude out of range: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("longitude out of range: {0}")]
    InvalidLongitude(f64),

    /// Load identifiers are caller-assigned but must not be blank
    #[error("load id must not be empty")]
    EmptyLoadId,

    /// Time window with latest before earliest
    #[error("time window ends before it starts")]
    InvalidTimeWindow,

    /// Negative weight, distance, or revenue on a load
    #[error("load {field} must not be negative: {value}")]
    NegativeLoadField { field: &'static str, value: f64 },

    /// A chain must contain at least one load
    #[error("chain must contain at least one load")]
    EmptyChain,

    /// The same load appeared twice in one chain
    #[error("load {0} appears more than once in chain")]
    DuplicateLoad(LoadId),

    /// Deadhead legs are distances and cannot be negative
    #[error("deadhead leg must be a non-negative distance: {0}")]
    InvalidDeadhead(f64),
}
