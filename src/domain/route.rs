use crate::domain::GeoLocation;
use crate::extensions::RoundTo;
use serde::Serialize;

/// Distance and travel time to the destination, as shown next to the map.
#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub distance_km: f64,
    pub duration_minutes: u32,
}

impl RouteInfo {
    pub fn from_directions(distance_meters: f64, duration_seconds: f64) -> Self {
        RouteInfo {
            distance_km: (distance_meters / 1000.0).round_to(2),
            duration_minutes: (duration_seconds / 60.0).round().max(0.0) as u32,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    pub info: RouteInfo,
    pub geometry: Vec<GeoLocation>,
}
