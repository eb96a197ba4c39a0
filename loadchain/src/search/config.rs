//! Search options and deadhead bounds.

use serde::{Deserialize, Serialize};

use crate::domain::GeoPoint;

use super::search::SearchError;

/// Tunable limits for one chain search.
///
/// Every field has a documented default; callers override individual fields
/// rather than relying on hidden constants inside the algorithm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Widest acceptable empty leg from the true origin to the first
    /// pickup point, in miles. Default 100.
    pub max_origin_deadhead_miles: f64,

    /// Widest acceptable empty leg from the last delivery point to the
    /// true destination, in miles. Default 100.
    pub max_destination_deadhead_miles: f64,

    /// Stop the search once this many chains have been collected. Default
    /// 200. The stop is global across the whole search tree.
    pub max_routes: usize,

    /// Maximum number of loads in one chain; bounds recursion depth.
    /// Default 3.
    pub max_chain_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_origin_deadhead_miles: 100.0,
            max_destination_deadhead_miles: 100.0,
            max_routes: 200,
            max_chain_length: 3,
        }
    }
}

impl SearchOptions {
    /// Reject option values the search cannot honor.
    pub fn validate(&self) -> Result<(), SearchError> {
        for (name, value) in [
            ("maxOriginDeadheadMiles", self.max_origin_deadhead_miles),
            (
                "maxDestinationDeadheadMiles",
                self.max_destination_deadhead_miles,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidRequest(format!(
                    "{name} must be a non-negative distance, got {value}"
                )));
            }
        }
        if self.max_routes == 0 {
            return Err(SearchError::InvalidRequest(
                "maxRoutes must be at least 1".to_string(),
            ));
        }
        if self.max_chain_length == 0 {
            return Err(SearchError::InvalidRequest(
                "maxChainLength must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The deadhead bounds requested, before any relaxation.
    pub fn bounds(&self) -> DeadheadBounds {
        DeadheadBounds {
            origin_miles: self.max_origin_deadhead_miles,
            destination_miles: self.max_destination_deadhead_miles,
        }
    }
}

/// The deadhead bound pair in force for one search pass.
///
/// Relaxation widens these; the response reports the pair actually used so
/// callers can tell a relaxed answer from one at the requested bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadheadBounds {
    pub origin_miles: f64,
    pub destination_miles: f64,
}

impl DeadheadBounds {
    /// Bound on the empty leg between consecutive loads.
    ///
    /// Policy: the inter-load bound equals the origin bound in force, which
    /// is the precedent set by the board's proximity matching.
    pub fn inter_load_miles(&self) -> f64 {
        self.origin_miles
    }
}

/// Where to search from and to, plus the limits to search under.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub origin: GeoPoint,
    pub destination: GeoPoint,

    #[serde(default)]
    pub options: SearchOptions,
}

impl SearchCriteria {
    pub fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
            options: SearchOptions::default(),
        }
    }

    /// Validate endpoints and options before search begins.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.origin.validate()?;
        self.destination.validate()?;
        self.options.validate()
    }
}
