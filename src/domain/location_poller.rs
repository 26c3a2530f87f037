use crate::domain::BearerToken;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;

/// Asks the backend for the last location it received for an order.
#[async_trait]
pub trait LocationPoller: Debug + Send + Sync {
    async fn last_known_location(&self, order_hash: &str, auth_token: &BearerToken) -> Result<Value, PollError>;
}

#[derive(Error, Debug)]
pub enum PollError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("poll client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error("no location data found, status {0}")]
    UnexpectedStatus(StatusCode),
}
