//! Geographic points and great-circle distance.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A geographic coordinate with an optional place name.
///
/// Used for the true origin and destination of a search and for every load
/// endpoint. Latitude must lie in [-90, 90] and longitude in [-180, 180];
/// both must be finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl GeoPoint {
    /// Create a point from validated coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let point = Self {
            latitude,
            longitude,
            city: None,
            state: None,
        };
        point.validate()?;
        Ok(point)
    }

    /// Attach a city and state to this point.
    pub fn with_place(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    /// Check the coordinate ranges.
    ///
    /// Deserialized points have not been range-checked; callers validate
    /// before any distance math happens.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DomainError::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DomainError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

/// Haversine great-circle distance between two points, in miles.
///
/// This is a proxy for road distance, not a measurement of it: symmetric,
/// non-negative, zero only for identical coordinates, and it satisfies the
/// triangle inequality, which is what the index prefilter and search
/// pruning rely on.
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can nudge h past 1 for near-antipodal points; clamp so
    // asin stays defined.
    2.0 * EARTH_RADIUS_MILES * h.sqrt().min(1.0).asin()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord_strategy() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap())
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coord_strategy(), b in coord_strategy()) {
            let ab = distance_miles(&a, &b);
            let ba = distance_miles(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        #[test]
        fn distance_is_non_negative(a in coord_strategy(), b in coord_strategy()) {
            prop_assert!(distance_miles(&a, &b) >= 0.0);
        }

        #[test]
        fn triangle_inequality(
            a in coord_strategy(),
            b in coord_strategy(),
            c in coord_strategy(),
        ) {
            let direct = distance_miles(&a, &c);
            let via = distance_miles(&a, &b) + distance_miles(&b, &c);
            prop_assert!(direct <= via + 1e-6);
        }

        #[test]
        fn valid_coordinates_always_accepted(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
        ) {
            prop_assert!(GeoPoint::new(lat, lon).is_ok());
        }
    }
}
