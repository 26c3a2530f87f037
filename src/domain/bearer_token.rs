use reqwest::header::{HeaderValue, InvalidHeaderValue};
use std::fmt::{Debug, Formatter};

/// An opaque token handed out by the auth API.
#[derive(Clone, PartialEq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        BearerToken(token.into())
    }

    /// The raw token, as sent in a socket.io handshake.
    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl Debug for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}
