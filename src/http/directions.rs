use crate::app_config::Directions;
use crate::domain::{DirectionsProvider, DirectionsRoute, GeoLocation, RouteUnavailable};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Mapbox directions API client.
#[derive(Debug)]
pub struct MapboxDirections {
    client: Client,
    url: String,
    profile: String,
    access_token: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<RouteGet>,
}

#[derive(Debug, Deserialize)]
struct RouteGet {
    distance: f64,
    duration: f64,
    geometry: GeometryGet,
}

#[derive(Debug, Deserialize)]
struct GeometryGet {
    coordinates: Vec<[f64; 2]>,
}

impl MapboxDirections {
    pub fn new(client: Client, config: &Directions, timeout: Duration) -> Self {
        MapboxDirections {
            client,
            url: config.url().to_string(),
            profile: config.profile().to_string(),
            access_token: config.access_token().to_string(),
            timeout,
        }
    }

    fn route_url(&self, from: GeoLocation, to: GeoLocation) -> String {
        format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.url, self.profile, from.longitude, from.latitude, to.longitude, to.latitude
        )
    }
}

#[async_trait]
impl DirectionsProvider for MapboxDirections {
    #[instrument(skip(self))]
    async fn directions(&self, from: GeoLocation, to: GeoLocation) -> Result<Vec<DirectionsRoute>, RouteUnavailable> {
        let url = self.route_url(from, to);
        debug!(url, "Requesting directions...");

        let response = self
            .client
            .get(&url)
            .query(&[("geometries", "geojson"), ("access_token", self.access_token.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RouteUnavailable::UnexpectedStatus { status, body });
        }

        let directions = serde_json::from_str::<DirectionsResponse>(&body)?;
        debug!("Requesting directions... OK, {} route(s) found", directions.routes.len());

        Ok(directions
            .routes
            .into_iter()
            .map(|route| DirectionsRoute {
                distance_meters: route.distance,
                duration_seconds: route.duration,
                geometry: route.geometry.coordinates.into_iter().map(GeoLocation::from_lng_lat).collect(),
            })
            .collect())
    }
}
