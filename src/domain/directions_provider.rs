use crate::domain::GeoLocation;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

#[async_trait]
pub trait DirectionsProvider: Debug + Send + Sync {
    /// Returns the routes from `from` to `to`, best route first.
    async fn directions(&self, from: GeoLocation, to: GeoLocation) -> Result<Vec<DirectionsRoute>, RouteUnavailable>;
}

/// A route as returned by the directions provider.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionsRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<GeoLocation>,
}

#[derive(Error, Debug)]
pub enum RouteUnavailable {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("directions request failed with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("malformed directions response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no route found")]
    NoRoute,
}
