//! Geocoding request types.
//!
//! The single-query endpoints take their parameters from the URL query
//! string (built in `mapbox_geocoding`). The serde representation here is
//! the batch endpoint's per-query JSON object, in which every unset
//! optional is omitted.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Coordinate, FeatureType};

/// Forward geocoding: search text to features.
///
/// See <https://docs.mapbox.com/api/search/geocoding/#forward-geocoding-with-search-text-input>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardGeocodeRequest {
    /// Free-form search text.
    #[serde(rename = "q")]
    pub search_text: String,

    /// Return partial matches for the last word of the query.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
    /// Limit results to this area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    /// Comma-separated ISO 3166 alpha-2 country codes.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub country: Option<String>,
    /// IETF language tag for the response.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub language: Option<String>,
    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "is_unset_limit")]
    pub limit: Option<u32>,
    /// Bias results towards this point.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "lng_lat")]
    pub proximity: Option<Coordinate>,
    /// Restrict results to these feature types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<FeatureType>,
    /// Worldview for disputed borders (e.g. `us`, `cn`, `jp`, `in`).
    #[serde(default, skip_serializing_if = "is_blank")]
    pub worldview: Option<String>,
    /// Request results that may be stored permanently. Sent as a query
    /// parameter, never inside a batch entry.
    #[serde(default, skip_serializing)]
    pub permanent: bool,
}

impl ForwardGeocodeRequest {
    /// Creates a request for `search_text` with every option unset.
    #[must_use]
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Self::default()
        }
    }
}

/// Reverse geocoding: a point to the features around it.
///
/// See <https://docs.mapbox.com/api/search/geocoding/#reverse-geocoding>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocodeRequest {
    /// The point to look up.
    #[serde(flatten)]
    pub coordinate: Coordinate,

    /// Comma-separated ISO 3166 alpha-2 country codes.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub country: Option<String>,
    /// IETF language tag for the response.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub language: Option<String>,
    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "is_unset_limit")]
    pub limit: Option<u32>,
    /// Restrict results to these feature types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<FeatureType>,
    /// Worldview for disputed borders.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub worldview: Option<String>,
    /// Request results that may be stored permanently. Sent as a query
    /// parameter, never inside a batch entry.
    #[serde(default, skip_serializing)]
    pub permanent: bool,
}

impl ReverseGeocodeRequest {
    /// Creates a request for `coordinate` with every option unset.
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            ..Self::default()
        }
    }
}

/// A set of queries sent in one batch call.
///
/// Reverse queries are sent first, then forward queries, and the response
/// lists results in that same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeBatchRequest {
    /// Reverse queries.
    #[serde(default)]
    pub reverse: Vec<ReverseGeocodeRequest>,
    /// Forward queries.
    #[serde(default)]
    pub forward: Vec<ForwardGeocodeRequest>,
}

impl GeocodeBatchRequest {
    /// Total number of queries in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len() + self.forward.len()
    }

    /// Whether the batch holds no queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty() && self.forward.is_empty()
    }

    /// Whether any query asks for permanent results.
    #[must_use]
    pub fn permanent(&self) -> bool {
        self.reverse.iter().any(|r| r.permanent) || self.forward.iter().any(|f| f.permanent)
    }
}

/// Whether an optional string parameter should be left out.
#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Whether a `limit` parameter should be left out.
#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
const fn is_unset_limit(limit: &Option<u32>) -> bool {
    matches!(limit, None | Some(0))
}

/// `Option<Coordinate>` as a `[lng, lat]` array.
mod lng_lat {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::Coordinate;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<Coordinate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(c) => serializer.serialize_some(&[c.lng, c.lat]),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Coordinate>, D::Error> {
        let pair = Option::<[f64; 2]>::deserialize(deserializer)?;
        Ok(pair.map(|[lng, lat]| Coordinate::new(lat, lng)))
    }
}
