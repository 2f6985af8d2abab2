//! Rate-limit descriptors and response header parsing.
//!
//! Mapbox reports quota state on every response through three headers:
//!
//! - `X-Rate-Limit-Limit`: requests allowed per interval
//! - `X-Rate-Limit-Interval`: interval length in seconds
//! - `X-Rate-Limit-Reset`: Unix time at which the quota resets
//!
//! This module only reads them. Throttling is left to the caller.
//!
//! See <https://docs.mapbox.com/api/guides/#rate-limit-headers>

use reqwest::header::HeaderMap;

/// The API family a request belongs to, with its documented default quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Short API name used in logs and errors.
    pub name: &'static str,
    /// Default number of requests per interval.
    pub requests: u32,
    /// Interval length in seconds.
    pub interval_secs: u64,
}

/// Geocoding v6 (forward, reverse and batch): 1000 requests per minute.
pub const GEOCODING_RATE_LIMIT: RateLimit = RateLimit {
    name: "geocoding",
    requests: 1000,
    interval_secs: 60,
};

pub const LIMIT_HEADER: &str = "x-rate-limit-limit";
pub const INTERVAL_HEADER: &str = "x-rate-limit-interval";
pub const RESET_HEADER: &str = "x-rate-limit-reset";

/// Quota state as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Requests allowed per interval.
    pub limit: Option<u32>,
    /// Interval length in seconds.
    pub interval_secs: Option<u64>,
    /// Unix timestamp at which the quota resets.
    pub reset: Option<u64>,
}

impl RateLimitHeaders {
    /// Reads the rate-limit headers; missing or non-numeric values are
    /// `None`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_number(headers, LIMIT_HEADER),
            interval_secs: header_number(headers, INTERVAL_HEADER),
            reset: header_number(headers, RESET_HEADER),
        }
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
