#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for Mapbox web services.
//!
//! [`Client`] holds the access token and the underlying
//! [`reqwest::Client`]. API bindings (see `mapbox_geocoding`) build their
//! own query parameters, send them with [`Client::get`] or
//! [`Client::post`], then decode with [`Client::handle_response`], which
//! maps error statuses to [`ClientError`].
//!
//! Retries and throttling are not done here. A 429 response surfaces as
//! [`ClientError::RateLimited`] carrying whatever quota headers the server
//! sent.

pub mod config;
pub mod rate_limit;

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use config::ClientConfig;
pub use rate_limit::{GEOCODING_RATE_LIMIT, RateLimit, RateLimitHeaders};

/// Errors from Mapbox client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the raw body.
        message: String,
    },

    /// The API answered 429 Too Many Requests.
    #[error("Rate limit exceeded for {api} API (limit: {limit:?}, reset: {reset:?})")]
    RateLimited {
        /// API family the request belonged to.
        api: &'static str,
        /// Requests allowed per interval, if reported.
        limit: Option<u32>,
        /// Interval length in seconds, if reported.
        interval_secs: Option<u64>,
        /// Unix time at which the quota resets, if reported.
        reset: Option<u64>,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was malformed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Mapbox error body: `{"message": "..."}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// A Mapbox API client bound to one access token.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the access token is empty, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.access_token.is_empty() {
            return Err(ClientError::Config {
                message: format!(
                    "missing access token (set {} or access_token in the config file)",
                    config::ACCESS_TOKEN_ENV
                ),
            });
        }

        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// Creates a client configured from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `MAPBOX_ACCESS_TOKEN` is unset.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env())
    }

    /// The access token requests are signed with.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.config.access_token
    }

    /// API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Sends `GET {base_url}{endpoint}` with `query` as URL parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the request cannot be sent.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, ClientError> {
        log::debug!("GET {endpoint} [{}]", param_names(query));
        Ok(self.http.get(self.url(endpoint)).query(query).send().await?)
    }

    /// Sends `POST {base_url}{endpoint}` with a JSON `body`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the request cannot be sent.
    pub async fn post(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Vec<u8>,
    ) -> Result<reqwest::Response, ClientError> {
        log::debug!(
            "POST {endpoint} [{}] ({} byte body)",
            param_names(query),
            body.len()
        );
        Ok(self
            .http
            .post(self.url(endpoint))
            .query(query)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?)
    }

    /// Decodes a successful response as `T`, or maps an error status to
    /// [`ClientError`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`] on HTTP 429
    /// - [`ClientError::Api`] on any other non-2xx status
    /// - [`ClientError::Http`] if the body cannot be read
    /// - [`ClientError::Json`] if the body is not a valid `T`
    pub async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        rate_limit: RateLimit,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let headers = RateLimitHeaders::from_headers(response.headers());
            log::warn!(
                "{} rate limit hit on {} (documented quota {}/{}s, reported limit {:?}, reset {:?})",
                rate_limit.name,
                self.base_url(),
                rate_limit.requests,
                rate_limit.interval_secs,
                headers.limit,
                headers.reset,
            );
            return Err(ClientError::RateLimited {
                api: rate_limit.name,
                limit: headers.limit,
                interval_secs: headers.interval_secs,
                reset: headers.reset,
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or_else(|_| body.trim().to_string(), |e| e.message);
            log::debug!("{} API returned {status}: {message}", rate_limit.name);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Parameter names for logging; values are left out so the token never
/// reaches the log.
fn param_names(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
