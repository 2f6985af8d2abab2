//! Batch geocoding.
//!
//! Sends many queries in one `POST`. The body is a JSON array with one
//! object per query; reverse queries come first, then forward queries,
//! and the `batch` array of the response follows the same order.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/#batch-geocoding>

use mapbox_client::{Client, GEOCODING_RATE_LIMIT};
use mapbox_geocoding_models::{
    ForwardGeocodeRequest, GEOCODING_BATCH_ENDPOINT, GeocodeBatchRequest, GeocodeBatchResponse,
    ReverseGeocodeRequest,
};
use serde::Serialize;

use crate::GeocodeError;

/// Maximum number of queries per batch request.
pub const MAX_BATCH_SIZE: usize = 1000;

#[derive(Serialize)]
#[serde(untagged)]
enum BatchQuery<'a> {
    Reverse(&'a ReverseGeocodeRequest),
    Forward(&'a ForwardGeocodeRequest),
}

/// Serializes the queries of `req` into the batch request body.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn batch_body(req: &GeocodeBatchRequest) -> Result<Vec<u8>, serde_json::Error> {
    let queries: Vec<BatchQuery<'_>> = req
        .reverse
        .iter()
        .map(BatchQuery::Reverse)
        .chain(req.forward.iter().map(BatchQuery::Forward))
        .collect();

    serde_json::to_vec(&queries)
}

/// Geocodes every query of `req` in a single call.
///
/// An empty batch returns an empty response without contacting the API.
///
/// # Errors
///
/// - [`GeocodeError::BatchTooLarge`] if `req` holds more than
///   [`MAX_BATCH_SIZE`] queries
/// - [`GeocodeError::Serialize`] if the body cannot be built
/// - [`GeocodeError::Client`] if the request fails, the API returns an
///   error status, or the response cannot be decoded
pub async fn reverse_geocode_batch(
    client: &Client,
    req: &GeocodeBatchRequest,
) -> Result<GeocodeBatchResponse, GeocodeError> {
    if req.is_empty() {
        return Ok(GeocodeBatchResponse::default());
    }

    if req.len() > MAX_BATCH_SIZE {
        return Err(GeocodeError::BatchTooLarge {
            size: req.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    let mut query = vec![("access_token", client.access_token().to_string())];
    if req.permanent() {
        query.push(("permanent", "true".to_string()));
    }

    let body = batch_body(req)?;

    log::debug!(
        "Batch geocoding {} reverse and {} forward queries",
        req.reverse.len(),
        req.forward.len()
    );

    let response = client.post(GEOCODING_BATCH_ENDPOINT, &query, body).await?;
    let decoded: GeocodeBatchResponse = client
        .handle_response(response, GEOCODING_RATE_LIMIT)
        .await?;

    if decoded.batch.len() != req.len() {
        log::warn!(
            "Batch geocode returned {} result(s) for {} queries",
            decoded.batch.len(),
            req.len()
        );
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use mapbox_geocoding_models::{Coordinate, FeatureType};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::{TOKEN, client_for, feature_collection};

    fn sample_batch() -> GeocodeBatchRequest {
        GeocodeBatchRequest {
            reverse: vec![ReverseGeocodeRequest {
                types: vec![FeatureType::Place],
                ..ReverseGeocodeRequest::new(Coordinate::new(40.733, -73.989))
            }],
            forward: vec![ForwardGeocodeRequest {
                country: Some("us".to_string()),
                ..ForwardGeocodeRequest::new("Chicago")
            }],
        }
    }

    #[test]
    fn body_lists_reverse_before_forward() {
        let body = batch_body(&sample_batch()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "longitude": -73.989, "latitude": 40.733, "types": ["place"] },
                { "q": "Chicago", "country": "us" }
            ])
        );
    }

    #[tokio::test]
    async fn batch_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GEOCODING_BATCH_ENDPOINT))
            .and(query_param("access_token", TOKEN))
            .and(body_json(serde_json::json!([
                { "longitude": -73.989, "latitude": 40.733, "types": ["place"] },
                { "q": "Chicago", "country": "us" }
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "batch": [
                    feature_collection("New York", -73.989, 40.733),
                    feature_collection("Chicago", -87.6244, 41.8756)
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = reverse_geocode_batch(&client_for(&server), &sample_batch())
            .await
            .unwrap();

        assert_eq!(resp.batch.len(), 2);
        let names: Vec<&str> = resp
            .batch
            .iter()
            .map(|r| r.features[0].properties.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["New York", "Chicago"]);
    }

    #[tokio::test]
    async fn empty_batch_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let resp = reverse_geocode_batch(&client_for(&server), &GeocodeBatchRequest::default())
            .await
            .unwrap();
        assert!(resp.batch.is_empty());
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let server = MockServer::start().await;
        let req = GeocodeBatchRequest {
            reverse: vec![
                ReverseGeocodeRequest::new(Coordinate::new(1.0, 1.0));
                MAX_BATCH_SIZE + 1
            ],
            forward: Vec::new(),
        };

        let err = reverse_geocode_batch(&client_for(&server), &req)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeocodeError::BatchTooLarge { size: 1001, max: 1000 }
        ));
    }

    #[tokio::test]
    async fn permanent_flag_goes_to_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GEOCODING_BATCH_ENDPOINT))
            .and(query_param("permanent", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "batch": [feature_collection("Chicago", -87.6244, 41.8756)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let req = GeocodeBatchRequest {
            reverse: Vec::new(),
            forward: vec![ForwardGeocodeRequest {
                permanent: true,
                ..ForwardGeocodeRequest::new("Chicago")
            }],
        };
        let resp = reverse_geocode_batch(&client_for(&server), &req)
            .await
            .unwrap();
        assert_eq!(resp.batch.len(), 1);
    }
}
