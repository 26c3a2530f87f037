use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoLocation { latitude, longitude }
    }

    /// Builds a location from a GeoJSON position, which is ordered `[longitude, latitude]`.
    pub fn from_lng_lat([longitude, latitude]: [f64; 2]) -> Self {
        GeoLocation { latitude, longitude }
    }
}

impl Display for GeoLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
