use crate::domain::{DirectionsProvider, GeoLocation, LocationSample, Route, RouteInfo, RouteUnavailable};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Turns a rider position into a route and estimate to the fixed destination.
#[derive(Clone, Debug)]
pub struct RouteRefresher {
    provider: Arc<dyn DirectionsProvider>,
    destination: GeoLocation,
}

impl RouteRefresher {
    pub fn new(provider: Arc<dyn DirectionsProvider>, destination: GeoLocation) -> Self {
        RouteRefresher { provider, destination }
    }

    #[instrument(skip_all, fields(latitude = sample.latitude, longitude = sample.longitude))]
    pub async fn refresh(&self, sample: &LocationSample) -> Result<Route, RouteUnavailable> {
        debug!("🗺️ Refreshing route to {}...", self.destination);
        let routes = self.provider.directions(sample.position(), self.destination).await?;
        let best = routes.into_iter().next().ok_or(RouteUnavailable::NoRoute)?;

        let route = Route {
            info: RouteInfo::from_directions(best.distance_meters, best.duration_seconds),
            geometry: best.geometry,
        };
        debug!(
            distance_km = route.info.distance_km,
            duration_minutes = route.info.duration_minutes,
            "🗺️ Refreshing route to {}... OK",
            self.destination
        );
        Ok(route)
    }
}
