//! Loads and their identifiers, time windows, and revenue.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::GeoPoint;

/// Average empty-travel speed used to estimate deadhead transit time.
const DEADHEAD_SPEED_MPH: f64 = 50.0;

/// Floor on estimated deadhead transit time.
const MIN_DEADHEAD_MINUTES: i64 = 30;

/// Scheduling slack allowed when linking one load's delivery window to the
/// next load's pickup window. Drivers routinely wait at a delivery point for
/// the next pickup to open, so the windows only need to line up loosely.
const CHAIN_SLACK_DAYS: i64 = 5;

/// A caller-assigned load identifier.
///
/// Identifiers are opaque strings; the only constraint is that they are not
/// empty, since chains and the search's used-set are keyed on them.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoadId(String);

impl LoadId {
    /// Parse an identifier, rejecting empty strings.
    pub fn parse(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();
        if s.is_empty() {
            return Err(DomainError::EmptyLoadId);
        }
        Ok(Self(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LoadId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<LoadId> for String {
    fn from(id: LoadId) -> Self {
        id.0
    }
}

impl fmt::Debug for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoadId({})", self.0)
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An inclusive earliest/latest pair of UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window, rejecting one that ends before it starts.
    pub fn new(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> Result<Self, DomainError> {
        let window = Self { earliest, latest };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.latest < self.earliest {
            return Err(DomainError::InvalidTimeWindow);
        }
        Ok(())
    }
}

/// Revenue posted for a load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    /// Total payout for hauling the load, in dollars.
    #[serde(default)]
    pub amount: f64,

    /// Posted per-mile rate, when the board supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_per_mile: Option<f64>,
}

/// A single shipment supplied with the search request.
///
/// Loads are read-only facts for the duration of one search; the engine
/// never stores them across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: LoadId,
    pub origin: GeoPoint,
    pub destination: GeoPoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_window: Option<TimeWindow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_window: Option<TimeWindow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_pounds: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Revenue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<i64>,
}

impl Load {
    /// Create a load with just the required fields.
    pub fn new(id: LoadId, origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            id,
            origin,
            destination,
            pickup_window: None,
            delivery_window: None,
            distance_miles: None,
            weight_pounds: None,
            revenue: None,
            estimated_duration_minutes: None,
        }
    }

    /// Validate a load received from the wire.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.origin.validate()?;
        self.destination.validate()?;

        if let Some(window) = &self.pickup_window {
            window.validate()?;
        }
        if let Some(window) = &self.delivery_window {
            window.validate()?;
        }

        for (field, value) in [
            ("distanceMiles", self.distance_miles),
            ("weightPounds", self.weight_pounds),
            ("revenue.amount", self.revenue.map(|r| r.amount)),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(DomainError::NegativeLoadField { field, value });
                }
            }
        }

        Ok(())
    }

    /// Posted revenue amount, zero when the board posted no rate.
    pub fn revenue_amount(&self) -> f64 {
        self.revenue.map(|r| r.amount).unwrap_or(0.0)
    }

    /// Shipment distance, zero when not supplied.
    pub fn shipment_miles(&self) -> f64 {
        self.distance_miles.unwrap_or(0.0)
    }

    /// Whether `next` can be hauled after this load, given the empty miles
    /// between this delivery point and the next pickup point.
    ///
    /// Transit time for the deadhead leg is estimated at highway speed with
    /// a half-hour floor. When either window is missing the link is assumed
    /// feasible; geographic bounds still apply.
    pub fn can_precede(&self, next: &Load, deadhead_miles: f64) -> bool {
        let (Some(delivery), Some(pickup)) = (&self.delivery_window, &next.pickup_window) else {
            return true;
        };

        let transit_minutes =
            ((deadhead_miles / DEADHEAD_SPEED_MPH) * 60.0) as i64;
        let transit = Duration::minutes(transit_minutes.max(MIN_DEADHEAD_MINUTES));
        let slack = Duration::days(CHAIN_SLACK_DAYS);

        // The delivery must be able to finish in time to make the pickup,
        // allowing waiting at the delivery point within the slack.
        if delivery.latest + transit > pickup.latest + slack {
            return false;
        }

        // Even the earliest possible delivery must not overshoot the pickup
        // window by more than the slack plus a day.
        if delivery.earliest + transit > pickup.latest + slack + Duration::days(1) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, d, 0, 0, 0).unwrap()
    }

    fn window(from_day: u32, to_day: u32) -> TimeWindow {
        TimeWindow::new(day(from_day), day(to_day)).unwrap()
    }

    fn load(id: &str) -> Load {
        Load::new(
            LoadId::parse(id).unwrap(),
            point(42.0, -71.0),
            point(40.0, -80.0),
        )
    }

    #[test]
    fn load_id_rejects_empty() {
        assert_eq!(LoadId::parse(""), Err(DomainError::EmptyLoadId));
        assert!(LoadId::parse("L-1").is_ok());
    }

    #[test]
    fn load_id_display() {
        let id = LoadId::parse("BOS-DAL-01").unwrap();
        assert_eq!(id.to_string(), "BOS-DAL-01");
        assert_eq!(format!("{id:?}"), "LoadId(BOS-DAL-01)");
    }

    #[test]
    fn time_window_rejects_inverted() {
        assert!(TimeWindow::new(day(22), day(21)).is_err());
        assert!(TimeWindow::new(day(21), day(21)).is_ok());
    }

    #[test]
    fn validate_rejects_negative_fields() {
        let mut l = load("L-1");
        l.distance_miles = Some(-10.0);
        assert!(matches!(
            l.validate(),
            Err(DomainError::NegativeLoadField { field: "distanceMiles", .. })
        ));

        let mut l = load("L-2");
        l.weight_pounds = Some(f64::NAN);
        assert!(l.validate().is_err());
    }

    #[test]
    fn validate_accepts_complete_load() {
        let mut l = load("L-1");
        l.pickup_window = Some(window(21, 22));
        l.delivery_window = Some(window(23, 24));
        l.distance_miles = Some(550.0);
        l.revenue = Some(Revenue {
            amount: 1800.0,
            rate_per_mile: Some(3.27),
        });
        assert!(l.validate().is_ok());
    }

    #[test]
    fn can_precede_without_windows() {
        let a = load("A");
        let b = load("B");
        assert!(a.can_precede(&b, 50.0));
    }

    #[test]
    fn can_precede_with_compatible_windows() {
        let mut a = load("A");
        a.delivery_window = Some(window(22, 23));
        let mut b = load("B");
        b.pickup_window = Some(window(23, 24));

        assert!(a.can_precede(&b, 40.0));
    }

    #[test]
    fn can_precede_allows_waiting_within_slack() {
        // Delivery closes a couple of days before the pickup opens; the
        // driver waits at the delivery point.
        let mut a = load("A");
        a.delivery_window = Some(window(21, 22));
        let mut b = load("B");
        b.pickup_window = Some(window(24, 25));

        assert!(a.can_precede(&b, 80.0));
    }

    #[test]
    fn can_precede_rejects_delivery_far_after_pickup() {
        // Delivery window closes more than the slack past the pickup window.
        let mut a = load("A");
        a.delivery_window = Some(window(21, 29));
        let mut b = load("B");
        b.pickup_window = Some(window(21, 22));

        assert!(!a.can_precede(&b, 40.0));
    }

    #[test]
    fn load_deserializes_wire_shape() {
        let json = r#"{
            "id": "LD-100",
            "origin": {"latitude": 42.4, "longitude": -71.1, "city": "Boston", "state": "MA"},
            "destination": {"latitude": 32.8, "longitude": -96.8},
            "pickupWindow": {"earliest": "2025-11-21T08:00:00Z", "latest": "2025-11-22T17:00:00Z"},
            "distanceMiles": 1550.0,
            "revenue": {"amount": 4200.0, "ratePerMile": 2.71}
        }"#;

        let l: Load = serde_json::from_str(json).unwrap();
        assert_eq!(l.id.as_str(), "LD-100");
        assert_eq!(l.origin.city.as_deref(), Some("Boston"));
        assert!(l.pickup_window.is_some());
        assert!(l.delivery_window.is_none());
        assert_eq!(l.revenue.unwrap().rate_per_mile, Some(2.71));
        assert!(l.validate().is_ok());
    }

    #[test]
    fn load_rejects_empty_id_on_deserialize() {
        let json = r#"{
            "id": "",
            "origin": {"latitude": 42.4, "longitude": -71.1},
            "destination": {"latitude": 32.8, "longitude": -96.8}
        }"#;
        assert!(serde_json::from_str::<Load>(json).is_err());
    }
}
