use crate::domain::GeoLocation;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    auth: Auth,
    api: Api,
    realtime: Realtime,
    directions: Directions,
    tracking: Tracking,
    http: Http,
}

impl AppConfig {
    /// Layers `config.toml`, an optional `config_local.toml` and `RIDER_TRACKER__SECTION__KEY` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("RIDER_TRACKER").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn realtime(&self) -> &Realtime {
        &self.realtime
    }

    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    pub fn tracking(&self) -> &Tracking {
        &self.tracking
    }

    pub fn http(&self) -> &Http {
        &self.http
    }
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    url: String,
    email: String,
    password: String,
}

impl Auth {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Debug, Deserialize)]
pub struct Api {
    url: String,
}

impl Api {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Deserialize)]
pub struct Realtime {
    url: String,
}

impl Realtime {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Deserialize)]
pub struct Directions {
    url: String,
    profile: String,
    access_token: String,
}

impl Directions {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Deserialize)]
pub struct Tracking {
    order_hash: String,
    destination: GeoLocation,
    event_buffer_size: usize,
}

impl Tracking {
    pub fn order_hash(&self) -> &str {
        &self.order_hash
    }

    pub fn destination(&self) -> GeoLocation {
        self.destination
    }

    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
}

impl Http {
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                auth: Auth {
                    url: "https://auth.url".to_string(),
                    email: "admin@example.com".to_string(),
                    password: "secret".to_string(),
                },
                api: Api {
                    url: "https://api.url".to_string(),
                },
                realtime: Realtime {
                    url: "https://realtime.url".to_string(),
                },
                directions: Directions {
                    url: "https://directions.url".to_string(),
                    profile: "driving".to_string(),
                    access_token: "pk.token".to_string(),
                },
                tracking: Tracking {
                    order_hash: "orderId9:riderId2".to_string(),
                    destination: GeoLocation::new(12.9742939, 77.6525189),
                    event_buffer_size: 8,
                },
                http: Http {
                    request_timeout: Duration::from_secs(5),
                },
            },
        }
    }

    pub fn url(mut self, url: String) -> Self {
        self.config.auth.url = url.clone();
        self.config.api.url = url.clone();
        self.config.realtime.url = url.clone();
        self.config.directions.url = url;
        self
    }

    pub fn credentials(mut self, email: &str, password: &str) -> Self {
        self.config.auth.email = email.to_string();
        self.config.auth.password = password.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_the_default_configuration() -> Result<(), ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(include_str!("../config.toml"), FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        assert_eq!(config.tracking().order_hash(), "orderId9:riderId2");
        assert_eq!(config.tracking().destination(), GeoLocation::new(12.9742939, 77.6525189));
        assert_eq!(config.directions().profile(), "driving");
        assert_eq!(config.http().request_timeout(), Duration::from_secs(10));
        Ok(())
    }

    #[test]
    fn rejects_an_invalid_destination() {
        let toml = include_str!("../config.toml").replace("latitude = 12.9742939", "latitude = 112.0");

        let result = Config::builder()
            .add_source(config::File::from_str(&toml, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>());

        assert!(result.is_err());
    }
}
