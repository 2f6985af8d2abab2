//! Forward geocoding.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/#forward-geocoding-with-search-text-input>

use mapbox_client::{Client, GEOCODING_RATE_LIMIT};
use mapbox_geocoding_models::{
    ForwardGeocodeRequest, GEOCODING_FORWARD_ENDPOINT, GeocodeResponse, types_query,
};

use crate::{GeocodeError, non_blank};

/// Builds the query parameters for a forward request.
///
/// `q`, `access_token` and `autocomplete` are always present. Every other
/// parameter is included only when set: a zero `bbox` minimum corner or a
/// zero `proximity` counts as unset.
#[must_use]
pub fn forward_query(
    access_token: &str,
    req: &ForwardGeocodeRequest,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("q", req.search_text.clone()),
        ("access_token", access_token.to_string()),
        ("autocomplete", req.autocomplete.to_string()),
    ];

    if let Some(bbox) = req.bbox.filter(|b| !b.min.is_zero()) {
        query.push(("bbox", bbox.query()));
    }

    if let Some(country) = non_blank(req.country.as_deref()) {
        query.push(("country", country.to_string()));
    }

    if let Some(language) = non_blank(req.language.as_deref()) {
        query.push(("language", language.to_string()));
    }

    if let Some(limit) = req.limit.filter(|l| *l != 0) {
        query.push(("limit", limit.to_string()));
    }

    if let Some(proximity) = req.proximity.filter(|p| !p.is_zero()) {
        query.push(("proximity", proximity.wgs84_format()));
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

/// Looks up features matching `req.search_text`.
///
/// # Errors
///
/// Returns [`GeocodeError::Client`] if the request fails, the API returns
/// an error status, or the response cannot be decoded.
pub async fn forward_geocode(
    client: &Client,
    req: &ForwardGeocodeRequest,
) -> Result<GeocodeResponse, GeocodeError> {
    let query = forward_query(client.access_token(), req);

    let response = client.get(GEOCODING_FORWARD_ENDPOINT, &query).await?;
    let decoded: GeocodeResponse = client
        .handle_response(response, GEOCODING_RATE_LIMIT)
        .await?;

    log::debug!(
        "Forward geocode returned {} feature(s)",
        decoded.features.len()
    );
    Ok(decoded)
}
