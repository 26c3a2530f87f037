use crate::domain::{BearerToken, LocationPoller, PollError};
use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument};

/// Polls `POST /rider-location` for the last location the backend received.
#[derive(Debug)]
pub struct RiderLocationClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RiderLocationClient {
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        RiderLocationClient {
            client,
            url: format!("{}/rider-location", base_url),
            timeout,
        }
    }
}

#[async_trait]
impl LocationPoller for RiderLocationClient {
    #[instrument(skip(self, auth_token))]
    async fn last_known_location(&self, order_hash: &str, auth_token: &BearerToken) -> Result<Value, PollError> {
        debug!("Fetching last known location...");
        let response = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, auth_token.header_value()?)
            .json(&json!({ "hash": order_hash }))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PollError::UnexpectedStatus(response.status()));
        }

        let location = response.json::<Value>().await?;
        debug!(%location, "Fetching last known location... OK");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use test_log::test;

    #[test(tokio::test)]
    async fn posts_the_order_hash_with_the_bearer_token() -> Result<(), PollError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rider-location")
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::Json(json!({ "hash": "orderId9:riderId2" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/rider_location_response.json"))
            .create_async()
            .await;

        let poller = RiderLocationClient::new(Client::new(), &server.url(), Duration::from_secs(1));
        let location = poller.last_known_location("orderId9:riderId2", &BearerToken::new("token")).await?;

        mock.assert_async().await;
        assert_eq!(location["location"]["lat"], json!(16.2330121));
        assert_eq!(location["timestamp"], json!("2025-05-10T10:15:30.000Z"));
        Ok(())
    }

    #[test(tokio::test)]
    async fn fails_when_no_location_is_known() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rider-location")
            .with_status(404)
            .with_body(r#"{ "message": "No location found" }"#)
            .create_async()
            .await;

        let poller = RiderLocationClient::new(Client::new(), &server.url(), Duration::from_secs(1));
        let result = poller.last_known_location("orderId9:riderId2", &BearerToken::new("token")).await;

        assert!(matches!(result, Err(PollError::UnexpectedStatus(status)) if status == StatusCode::NOT_FOUND));
    }

    #[test(tokio::test)]
    async fn fails_on_a_body_that_is_not_json() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/rider-location").with_status(200).with_body("<html>").create_async().await;

        let poller = RiderLocationClient::new(Client::new(), &server.url(), Duration::from_secs(1));
        let result = poller.last_known_location("orderId9:riderId2", &BearerToken::new("token")).await;

        assert!(matches!(result, Err(PollError::RequestError(_))));
    }
}
