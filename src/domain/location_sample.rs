use crate::domain::GeoLocation;
use chrono::DateTime;
use serde::Serialize;

/// The canonical form of a rider position, whichever source it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, timestamp: impl Into<String>) -> Self {
        LocationSample {
            latitude,
            longitude,
            timestamp: timestamp.into(),
        }
    }

    pub fn position(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }

    /// Returns true only when both timestamps are RFC 3339 and `self` is strictly older than `other`.
    pub fn is_older_than(&self, other: &LocationSample) -> bool {
        match (DateTime::parse_from_rfc3339(&self.timestamp), DateTime::parse_from_rfc3339(&other.timestamp)) {
            (Ok(own), Ok(other)) => own < other,
            _ => false,
        }
    }
}
