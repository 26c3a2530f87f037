use crate::domain::{GeoLocation, LocationSample, Route, RouteInfo};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// What the presentation layer renders: the rider marker, the route polyline and the estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub route_info: RouteInfo,
    #[serde(skip)]
    pub route_geometry: Vec<GeoLocation>,
}

impl Snapshot {
    pub fn new(sample: &LocationSample, route: Option<&Route>) -> Self {
        Snapshot {
            latitude: sample.latitude,
            longitude: sample.longitude,
            timestamp: sample.timestamp.clone(),
            route_info: route.map(|route| route.info).unwrap_or_default(),
            route_geometry: route.map(|route| route.geometry.clone()).unwrap_or_default(),
        }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.6}, {:.6} at {}, {:.2} km / {} minutes to destination",
            self.latitude, self.longitude, self.timestamp, self.route_info.distance_km, self.route_info.duration_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uses_zero_route_info_without_a_route() {
        let snapshot = Snapshot::new(&LocationSample::new(12.97, 77.65, "T1"), None);

        assert_eq!(snapshot.route_info, RouteInfo::default());
        assert!(snapshot.route_geometry.is_empty());
    }

    #[test]
    fn displays_position_and_estimate() {
        let route = Route {
            info: RouteInfo::from_directions(5000.0, 900.0),
            geometry: vec![],
        };
        let snapshot = Snapshot::new(&LocationSample::new(12.97, 77.65, "T1"), Some(&route));

        assert_eq!(snapshot.to_string(), "12.970000, 77.650000 at T1, 5.00 km / 15 minutes to destination");
    }

    #[test]
    fn serializes_the_presentation_payload() -> Result<(), serde_json::Error> {
        let snapshot = Snapshot::new(&LocationSample::new(12.97, 77.65, "T1"), None);

        assert_eq!(
            serde_json::to_string(&snapshot)?,
            r#"{"latitude":12.97,"longitude":77.65,"timestamp":"T1","routeInfo":{"distanceKm":0.0,"durationMinutes":0}}"#
        );
        Ok(())
    }
}
