#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the Mapbox Geocoding v6 API.
//!
//! This crate contains only data types and their wire representations.
//! It has no HTTP dependencies; the request/response plumbing lives in
//! `mapbox_client` and `mapbox_geocoding`.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/>

pub mod request;
pub mod response;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;
use strum_macros::{AsRefStr, Display, EnumIter};

pub use request::{ForwardGeocodeRequest, GeocodeBatchRequest, ReverseGeocodeRequest};
pub use response::{
    Context, ExtendedCoordinate, Feature, GeocodeBatchResponse, GeocodeResponse, Geometry,
    Properties, RoutablePoint,
};

/// Path of the batch geocoding endpoint.
pub const GEOCODING_BATCH_ENDPOINT: &str = "/search/geocode/v6/batch";
/// Path of the reverse geocoding endpoint.
pub const GEOCODING_REVERSE_ENDPOINT: &str = "/search/geocode/v6/reverse";
/// Path of the forward geocoding endpoint.
pub const GEOCODING_FORWARD_ENDPOINT: &str = "/search/geocode/v6/forward";

/// A WGS84 point.
///
/// In batch request bodies the point is written as `longitude` /
/// `latitude` keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    #[serde(rename = "latitude")]
    pub lat: f64,
    /// Longitude in degrees.
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are exactly zero (the "unset" value).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Formats the point as `"lng,lat"`, the order Mapbox expects.
    #[must_use]
    pub fn wgs84_format(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

/// Error returned when a coordinate or bounding box string is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordinateError {
    /// The input that failed to parse.
    pub input: String,
    /// Number of comma-separated numbers that were expected.
    pub expected: usize,
}

impl std::fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid value '{}': expected {} comma-separated numbers",
            self.input, self.expected
        )
    }
}

impl std::error::Error for ParseCoordinateError {}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], ParseCoordinateError> {
    let err = || ParseCoordinateError {
        input: s.to_string(),
        expected: N,
    };

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(err());
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse::<f64>().map_err(|_| err())?;
    }
    Ok(out)
}

/// Parses `"lng,lat"`.
impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [lng, lat] = parse_numbers::<2>(s)?;
        Ok(Self { lat, lng })
    }
}

/// A rectangular search area, `min` being the south-west corner.
///
/// Serialized as `[min_lng, min_lat, max_lng, max_lat]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// South-west corner.
    pub min: Coordinate,
    /// North-east corner.
    pub max: Coordinate,
}

impl BoundingBox {
    /// Formats the box as the `bbox` query value.
    #[must_use]
    pub fn query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min.lng, self.min.lat, self.max.lng, self.max.lat
        )
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([min_lng, min_lat, max_lng, max_lat]: [f64; 4]) -> Self {
        Self {
            min: Coordinate::new(min_lat, min_lng),
            max: Coordinate::new(max_lat, max_lng),
        }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.min.lng, bbox.min.lat, bbox.max.lng, bbox.max.lat]
    }
}

/// Parses `"min_lng,min_lat,max_lng,max_lat"`.
impl FromStr for BoundingBox {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numbers::<4>(s).map(Self::from)
    }
}

/// Feature types understood by the Geocoding v6 API.
///
/// Used both as a request filter (`types`) and as the key of a feature's
/// `context` hierarchy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeatureType {
    /// Country.
    Country,
    /// First-order administrative division (state, province).
    Region,
    /// Postal code.
    Postcode,
    /// Administrative division between region and place.
    District,
    /// City, town or village.
    Place,
    /// Official sub-city feature.
    Locality,
    /// Colloquial sub-city feature.
    Neighborhood,
    /// Street.
    Street,
    /// Japanese block.
    Block,
    /// Individual residential or business address.
    Address,
    /// Unit, suite or lot within an address.
    SecondaryAddress,
    /// A type this crate does not know about yet.
    #[default]
    #[serde(other)]
    Unknown,
}

impl FromStr for FeatureType {
    type Err = strum::ParseError;

    /// Parses a wire name. `Unknown` only comes from responses, so its
    /// name is not accepted here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .filter(|t| *t != Self::Unknown)
            .find(|t| t.as_ref() == s)
            .ok_or(strum::ParseError::VariantNotFound)
    }
}

/// Joins feature types into the comma-separated `types` query value.
#[must_use]
pub fn types_query(types: &[FeatureType]) -> String {
    types
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}
