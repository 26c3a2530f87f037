use crate::app_config::AppConfig;
use crate::domain::BearerToken;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};

/// An authenticated admin.
#[derive(Debug)]
pub struct AuthSession {
    pub token: BearerToken,
    pub user: User,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub full_name: Option<String>,
    pub email: String,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.email)
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Exchanges the configured credentials for a bearer token.
#[instrument(skip_all, fields(email = config.auth().email()))]
pub async fn login(client: &Client, config: &AppConfig) -> Result<AuthSession, AuthError> {
    let email = config.auth().email().trim();
    let password = config.auth().password();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    if password.trim().is_empty() {
        return Err(AuthError::MissingPassword);
    }

    info!("🔑 Logging in...");
    let response = client
        .post(format!("{}/users/login", config.auth().url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|error| error.message)
            .unwrap_or_else(|| "Login failed".to_string());
        return Err(AuthError::Rejected { status, message });
    }

    let login_response = serde_json::from_str::<LoginResponse>(&body)?;
    info!("🔑 Logging in... OK");

    Ok(AuthSession {
        token: BearerToken::new(login_response.token),
        user: login_response.user,
    })
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("email is required")]
    MissingEmail,
    #[error("password is required")]
    MissingPassword,
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("login rejected with status {status}: {message}")]
    Rejected { status: reqwest::StatusCode, message: String },
    #[error("unexpected login response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
