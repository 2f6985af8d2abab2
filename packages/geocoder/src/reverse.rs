//! Reverse geocoding.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/#reverse-geocoding>

use mapbox_client::{Client, GEOCODING_RATE_LIMIT};
use mapbox_geocoding_models::{
    GEOCODING_REVERSE_ENDPOINT, GeocodeResponse, ReverseGeocodeRequest, types_query,
};

use crate::{GeocodeError, non_blank};

/// Builds the query parameters for a reverse request.
///
/// `access_token`, `latitude` and `longitude` are always present.
#[must_use]
pub fn reverse_query(
    access_token: &str,
    req: &ReverseGeocodeRequest,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("access_token", access_token.to_string()),
        ("latitude", req.coordinate.lat.to_string()),
        ("longitude", req.coordinate.lng.to_string()),
    ];

    if let Some(country) = non_blank(req.country.as_deref()) {
        query.push(("country", country.to_string()));
    }

    if let Some(language) = non_blank(req.language.as_deref()) {
        query.push(("language", language.to_string()));
    }

    if let Some(limit) = req.limit.filter(|l| *l > 0) {
        query.push(("limit", limit.to_string()));
    }

    if !req.types.is_empty() {
        query.push(("types", types_query(&req.types)));
    }

    if let Some(worldview) = non_blank(req.worldview.as_deref()) {
        query.push(("worldview", worldview.to_string()));
    }

    if req.permanent {
        query.push(("permanent", "true".to_string()));
    }

    query
}

/// Looks up the features at `req.coordinate`.
///
/// # Errors
///
/// Returns [`GeocodeError::Client`] if the request fails, the API returns
/// an error status, or the response cannot be decoded.
pub async fn reverse_geocode(
    client: &Client,
    req: &ReverseGeocodeRequest,
) -> Result<GeocodeResponse, GeocodeError> {
    let query = reverse_query(client.access_token(), req);

    let response = client.get(GEOCODING_REVERSE_ENDPOINT, &query).await?;
    Ok(client
        .handle_response(response, GEOCODING_RATE_LIMIT)
        .await?)
}
