//! Client configuration.
//!
//! Settings come from an optional TOML file, with environment variables
//! taking precedence:
//!
//! ```toml
//! access_token = "pk.eyJ1Ijo..."
//! base_url = "https://api.mapbox.com"
//! timeout_secs = 30
//! user_agent = "my-app/1.0"
//! ```
//!
//! - `MAPBOX_ACCESS_TOKEN` overrides `access_token`
//! - `MAPBOX_BASE_URL` overrides `base_url`

use std::path::Path;

use serde::Deserialize;

use crate::ClientError;

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";
/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "MAPBOX_BASE_URL";

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Settings for building a [`crate::Client`].
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Mapbox access token sent as the `access_token` query parameter.
    #[serde(default)]
    pub access_token: String,
    /// Scheme and host of the API, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Custom `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field(
                "access_token",
                &if self.access_token.is_empty() {
                    ""
                } else {
                    "<redacted>"
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration for `access_token` against the production
    /// API.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Builds a configuration from defaults plus environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Toml`] if the document is malformed.
    pub fn parse(toml_str: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads a TOML file and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read or
    /// [`ClientError::Toml`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        log::debug!("Loading client config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents)?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies overrides from `lookup`, which maps an environment variable
    /// name to its value. Empty values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = get(ACCESS_TOKEN_ENV) {
            self.access_token = token;
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        self
    }
}
