//! Terminal rendering of geocoding responses.

use std::fmt::Write as _;

use mapbox_geocoding_models::{Feature, GeocodeBatchResponse, GeocodeResponse};

/// Prints one response as a table, or as pretty JSON when `json` is set.
pub fn print_response(resp: &GeocodeResponse, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(resp)?);
    } else {
        print!("{}", render_table(resp));
    }
    Ok(())
}

/// Prints a batch response, one table per query.
pub fn print_batch(resp: &GeocodeBatchResponse, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(resp)?);
        return Ok(());
    }

    for (i, entry) in resp.batch.iter().enumerate() {
        println!("# Query {}", i + 1);
        print!("{}", render_table(entry));
        println!();
    }
    Ok(())
}

fn render_table(resp: &GeocodeResponse) -> String {
    let mut out = String::new();

    if resp.features.is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    writeln!(out, "{:<18} {:<24} ADDRESS", "TYPE", "LNG,LAT").unwrap();
    writeln!(out, "{}", "-".repeat(80)).unwrap();
    for feature in &resp.features {
        writeln!(out, "{}", render_row(feature)).unwrap();
    }
    out
}

fn render_row(feature: &Feature) -> String {
    let position = feature
        .geometry
        .as_ref()
        .and_then(mapbox_geocoding_models::Geometry::point)
        .map_or_else(|| "-".to_string(), |p| p.wgs84_format());

    let (kind, label) = feature.properties.as_ref().map_or_else(
        || ("-", "-".to_string()),
        |p| (p.feature_type.as_ref(), p.label()),
    );

    format!("{kind:<18} {position:<24} {label}")
}
