//! Geocoding response types.
//!
//! Responses are `GeoJSON` `FeatureCollection`s. Fields the API documents
//! as optional decode to `None` or an empty collection when absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Coordinate, FeatureType};

/// Response of the forward and reverse endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Always `"FeatureCollection"`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Matches, best first.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Data attribution notice.
    #[serde(default)]
    pub attribution: String,
}

/// Response of the batch endpoint, one entry per query in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeBatchResponse {
    /// Per-query results.
    #[serde(default)]
    pub batch: Vec<GeocodeResponse>,
}

/// A single geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature identifier.
    #[serde(default)]
    pub id: String,
    /// Always `"Feature"`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Point geometry of the match.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Descriptive properties of the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

/// `GeoJSON` geometry; the geocoder only returns points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Geometry type, normally `"Point"`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// `[lng, lat]` for points.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Geometry {
    /// Returns the point position, if the geometry holds one.
    #[must_use]
    pub fn point(&self) -> Option<Coordinate> {
        match self.coordinates.as_slice() {
            [lng, lat, ..] => Some(Coordinate::new(*lat, *lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub mapbox_id: String,
    #[serde(default)]
    pub feature_type: FeatureType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_preferred: Option<String>,
    #[serde(default)]
    pub place_formatted: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub coordinates: ExtendedCoordinate,
    /// Administrative hierarchy the feature sits in.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<FeatureType, Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    /// Per-component match confidence (`address_number`, `street`, ...,
    /// `confidence`). Only present on forward address results.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_code: BTreeMap<String, String>,
}

impl Properties {
    /// Single-line label: the full address when present, otherwise the
    /// name followed by the formatted place.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(full_address) = &self.full_address {
            return full_address.clone();
        }
        match &self.place_formatted {
            Some(place) if !place.is_empty() => format!("{}, {place}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Position of a feature with accuracy information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedCoordinate {
    pub longitude: f64,
    pub latitude: f64,
    /// Accuracy of address points (`rooftop`, `parcel`, `point`,
    /// `interpolated`, `approximate`, `intersection`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routable_points: Vec<RoutablePoint>,
}

/// An entrance or access point for navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutablePoint {
    #[serde(default)]
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// One level of a feature's context hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub mapbox_id: String,
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code_full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_feature() -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "id": "dXJuOm1ieGFkcjo0ZjI",
            "geometry": { "type": "Point", "coordinates": [-77.036547, 38.897675] },
            "properties": {
                "mapbox_id": "dXJuOm1ieGFkcjo0ZjI",
                "feature_type": "address",
                "name": "1600 Pennsylvania Avenue Northwest",
                "name_preferred": "1600 Pennsylvania Avenue Northwest",
                "place_formatted": "Washington, District of Columbia 20500, United States",
                "full_address": "1600 Pennsylvania Avenue Northwest, Washington, District of Columbia 20500, United States",
                "coordinates": {
                    "longitude": -77.036547,
                    "latitude": 38.897675,
                    "accuracy": "rooftop",
                    "routable_points": [
                        { "name": "default", "longitude": -77.03655, "latitude": 38.89768 }
                    ]
                },
                "context": {
                    "address": {
                        "mapbox_id": "dXJuOm1ieGFkcjo0ZjI",
                        "address_number": "1600",
                        "street_name": "Pennsylvania Avenue Northwest",
                        "name": "1600 Pennsylvania Avenue Northwest"
                    },
                    "region": {
                        "mapbox_id": "dXJuOm1ieHBsYzpCUVRz",
                        "name": "District of Columbia",
                        "wikidata_id": "Q3551781",
                        "region_code": "DC",
                        "region_code_full": "US-DC"
                    },
                    "country": {
                        "mapbox_id": "dXJuOm1ieHBsYzpJdXc",
                        "name": "United States",
                        "wikidata_id": "Q30",
                        "country_code": "US",
                        "country_code_alpha_3": "USA"
                    }
                },
                "match_code": {
                    "address_number": "matched",
                    "street": "matched",
                    "confidence": "exact"
                }
            }
        })
    }

    #[test]
    fn decodes_address_feature() {
        let feature: Feature = serde_json::from_value(address_feature()).unwrap();
        let props = feature.properties.as_ref().unwrap();

        assert_eq!(props.feature_type, FeatureType::Address);
        assert_eq!(props.coordinates.accuracy.as_deref(), Some("rooftop"));
        assert_eq!(props.coordinates.routable_points.len(), 1);
        assert_eq!(props.match_code.get("confidence").map(String::as_str), Some("exact"));

        let region = &props.context[&FeatureType::Region];
        assert_eq!(region.region_code.as_deref(), Some("DC"));
        assert_eq!(region.region_code_full.as_deref(), Some("US-DC"));

        let address = &props.context[&FeatureType::Address];
        assert_eq!(address.address_number.as_deref(), Some("1600"));

        let point = feature.geometry.unwrap().point().unwrap();
        assert!((point.lat - 38.897_675).abs() < 1e-9);
        assert!((point.lng - -77.036_547).abs() < 1e-9);
    }

    #[test]
    fn decodes_collection_with_missing_optionals() {
        let body = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "dXJuOm1ieHBsYzpBUU5t",
                "geometry": { "type": "Point", "coordinates": [-73.99, 40.73] },
                "properties": {
                    "mapbox_id": "dXJuOm1ieHBsYzpBUU5t",
                    "feature_type": "place",
                    "name": "New York",
                    "coordinates": { "longitude": -73.99, "latitude": 40.73 },
                    "bbox": [-74.25, 40.49, -73.7, 40.91]
                }
            }],
            "attribution": "NOTICE: © 2024 Mapbox and its suppliers."
        });
        let resp: GeocodeResponse = serde_json::from_value(body).unwrap();

        assert_eq!(resp.kind, "FeatureCollection");
        assert_eq!(resp.features.len(), 1);
        let props = resp.features[0].properties.as_ref().unwrap();
        assert!(props.full_address.is_none());
        assert!(props.context.is_empty());
        assert_eq!(props.label(), "New York");
        let bbox = props.bbox.unwrap();
        assert!((bbox.max.lat - 40.91).abs() < 1e-9);
    }

    #[test]
    fn decodes_sparse_feature_with_empty_values() {
        let feature: Feature = serde_json::from_value(serde_json::json!({
            "geometry": { "coordinates": [2.35, 48.85] },
            "properties": { "name": "Paris" }
        }))
        .unwrap();

        assert!(feature.id.is_empty());
        assert!(feature.kind.is_empty());
        assert!(feature.geometry.as_ref().unwrap().kind.is_empty());
        let props = feature.properties.unwrap();
        assert!(props.mapbox_id.is_empty());
        assert_eq!(props.feature_type, FeatureType::Unknown);
        assert_eq!(props.label(), "Paris");

        let resp: GeocodeResponse =
            serde_json::from_value(serde_json::json!({ "features": [] })).unwrap();
        assert!(resp.kind.is_empty());
    }

    #[test]
    fn label_prefers_full_address() {
        let feature: Feature = serde_json::from_value(address_feature()).unwrap();
        assert!(
            feature
                .properties
                .unwrap()
                .label()
                .starts_with("1600 Pennsylvania Avenue Northwest, Washington")
        );
    }

    #[test]
    fn decodes_empty_batch() {
        let resp: GeocodeBatchResponse =
            serde_json::from_value(serde_json::json!({ "batch": [] })).unwrap();
        assert!(resp.batch.is_empty());
    }

    #[test]
    fn point_requires_two_numbers() {
        let geometry = Geometry {
            kind: "Point".to_string(),
            coordinates: vec![1.0],
        };
        assert!(geometry.point().is_none());
    }
}
