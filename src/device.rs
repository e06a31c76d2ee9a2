/*!
 # Device configuration

 Where the controller lives and the auth token to reach it with. A
 config is validated once on construction and never changes afterwards,
 so a single value can back any number of clients.
*/

use reqwest::Url;
use tracing::debug;

use crate::{Error, Result};

/// Environment variable holding the device API base URL
pub const URL_ENV: &str = "PANEL_URL";
/// Environment variable holding the auth token
pub const TOKEN_ENV: &str = "PANEL_TOKEN";

/// Base URL and auth token of a panel controller
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// API base, e.g. `http://192.168.1.40:16021/api/v1`
    url: String,
    token: String,
}

impl DeviceConfig {
    /// Validates and builds a config
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let token = token.into();

        let parsed = Url::parse(&url)
            .map_err(|e| Error::InvalidConfig(format!("invalid device url '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "unsupported url scheme '{}'",
                parsed.scheme()
            )));
        }

        if token.is_empty() {
            return Err(Error::InvalidConfig("auth token is empty".into()));
        }
        if token.contains('/') {
            return Err(Error::InvalidConfig(
                "auth token must not contain '/'".into(),
            ));
        }

        debug!("Configured device at {}", parsed);
        Ok(Self {
            url: url.trim_end_matches('/').to_owned(),
            token,
        })
    }

    /// Reads the config from `PANEL_URL` and `PANEL_TOKEN`
    pub fn from_env() -> Result<Self> {
        let read = |key: &str| {
            std::env::var(key).map_err(|_| Error::InvalidConfig(format!("{key} is not set")))
        };

        Self::new(read(URL_ENV)?, read(TOKEN_ENV)?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `<url>/<token>/effects`
    pub fn effects_endpoint(&self) -> String {
        format!("{}/{}/effects", self.url, self.token)
    }
}

// Keeps the token out of logs and panic messages
impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}
