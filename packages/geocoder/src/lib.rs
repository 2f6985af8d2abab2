#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Mapbox Geocoding v6 bindings.
//!
//! Three entry points, each of which builds the request parameters,
//! hands the call to a [`mapbox_client::Client`] and decodes the
//! result:
//!
//! 1. [`forward_geocode`]: search text to features (`GET .../forward`).
//! 2. [`reverse_geocode`]: a point to features (`GET .../reverse`).
//! 3. [`reverse_geocode_batch`]: many reverse and forward queries in one
//!    `POST .../batch` call with a JSON array body.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/>

pub mod batch;
pub mod forward;
pub mod reverse;

use thiserror::Error;

pub use batch::{MAX_BATCH_SIZE, reverse_geocode_batch};
pub use forward::forward_geocode;
pub use mapbox_geocoding_models as models;
pub use reverse::reverse_geocode;

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request failed in the client or the API returned an error.
    #[error(transparent)]
    Client(#[from] mapbox_client::ClientError),

    /// The batch body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The batch holds more queries than the API accepts.
    #[error("Batch of {size} queries exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of queries in the request.
        size: usize,
        /// Maximum the API accepts.
        max: usize,
    },
}

/// Treats an empty string the same as an absent one.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
