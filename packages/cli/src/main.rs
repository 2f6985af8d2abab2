#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for Mapbox geocoding.
//!
//! The access token comes from `MAPBOX_ACCESS_TOKEN` or from the TOML file
//! given with `--config`. Set `RUST_LOG=debug` to see outgoing requests.

mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mapbox_client::{Client, ClientConfig};
use mapbox_geocoding::{forward_geocode, reverse_geocode, reverse_geocode_batch};
use mapbox_geocoding_models::{
    BoundingBox, Coordinate, FeatureType, ForwardGeocodeRequest, GeocodeBatchRequest,
    ReverseGeocodeRequest,
};

#[derive(Parser)]
#[command(name = "mapbox_cli", about = "Mapbox geocoding tool")]
struct Cli {
    /// TOML file with `access_token`, `base_url`, `timeout_secs`, `user_agent`
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print the raw JSON response instead of a table
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up places matching search text
    Forward {
        /// Search text (address, place name, postcode, ...)
        query: String,
        /// Return partial matches for the last word
        #[arg(long)]
        autocomplete: bool,
        /// Search area as `min_lng,min_lat,max_lng,max_lat`
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<BoundingBox>,
        /// Comma-separated ISO 3166 alpha-2 country codes
        #[arg(long)]
        country: Option<String>,
        /// IETF language tag (e.g., "en")
        #[arg(long)]
        language: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,
        /// Bias results towards `lng,lat`
        #[arg(long, allow_hyphen_values = true)]
        proximity: Option<Coordinate>,
        /// Comma-separated feature types (e.g., "address,place")
        #[arg(long, value_delimiter = ',')]
        types: Vec<FeatureType>,
        /// Worldview for disputed borders (e.g., "us")
        #[arg(long)]
        worldview: Option<String>,
        /// Request results that may be stored permanently
        #[arg(long)]
        permanent: bool,
    },
    /// Look up places at a point
    Reverse {
        /// Point as `lng,lat`
        #[arg(allow_hyphen_values = true)]
        point: Coordinate,
        /// Comma-separated ISO 3166 alpha-2 country codes
        #[arg(long)]
        country: Option<String>,
        /// IETF language tag (e.g., "en")
        #[arg(long)]
        language: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,
        /// Comma-separated feature types (e.g., "address,place")
        #[arg(long, value_delimiter = ',')]
        types: Vec<FeatureType>,
        /// Worldview for disputed borders (e.g., "us")
        #[arg(long)]
        worldview: Option<String>,
        /// Request results that may be stored permanently
        #[arg(long)]
        permanent: bool,
    },
    /// Run a batch of queries from a JSON file
    /// (`{"reverse": [...], "forward": [...]}`)
    Batch {
        /// Path to the batch request JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::from_env(),
    };
    let client = Client::new(config)?;

    match cli.command {
        Commands::Forward {
            query,
            autocomplete,
            bbox,
            country,
            language,
            limit,
            proximity,
            types,
            worldview,
            permanent,
        } => {
            let req = ForwardGeocodeRequest {
                search_text: query,
                autocomplete,
                bbox,
                country,
                language,
                limit,
                proximity,
                types,
                worldview,
                permanent,
            };
            let resp = forward_geocode(&client, &req).await?;
            output::print_response(&resp, cli.json)?;
        }
        Commands::Reverse {
            point,
            country,
            language,
            limit,
            types,
            worldview,
            permanent,
        } => {
            let req = ReverseGeocodeRequest {
                coordinate: point,
                country,
                language,
                limit,
                types,
                worldview,
                permanent,
            };
            let resp = reverse_geocode(&client, &req).await?;
            output::print_response(&resp, cli.json)?;
        }
        Commands::Batch { file } => {
            let contents = std::fs::read_to_string(&file)?;
            let req: GeocodeBatchRequest = serde_json::from_str(&contents)?;
            log::info!(
                "Submitting batch of {} queries from {}",
                req.len(),
                file.display()
            );
            let resp = reverse_geocode_batch(&client, &req).await?;
            output::print_batch(&resp, cli.json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory as _;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_forward_with_negative_values() {
        let cli = Cli::try_parse_from([
            "mapbox_cli",
            "forward",
            "Union Station",
            "--proximity",
            "-77.006,38.897",
            "--bbox",
            "-77.1,38.8,-76.9,39.0",
            "--types",
            "address,poi_unknown",
        ]);
        // `poi_unknown` is not a feature type name.
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "mapbox_cli",
            "forward",
            "Union Station",
            "--proximity",
            "-77.006,38.897",
            "--bbox",
            "-77.1,38.8,-76.9,39.0",
            "--types",
            "address,place",
            "--limit",
            "3",
        ])
        .unwrap();
        let Commands::Forward {
            proximity,
            bbox,
            types,
            limit,
            ..
        } = cli.command
        else {
            panic!("expected forward command");
        };
        let proximity = proximity.unwrap();
        assert!((proximity.lng - -77.006).abs() < 1e-9);
        assert!((bbox.unwrap().max.lat - 39.0).abs() < 1e-9);
        assert_eq!(types, vec![FeatureType::Address, FeatureType::Place]);
        assert_eq!(limit, Some(3));
    }

    #[test]
    fn reverse_types_reject_unknown() {
        let cli = Cli::try_parse_from([
            "mapbox_cli",
            "reverse",
            "-73.989,40.733",
            "--types",
            "unknown",
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "mapbox_cli",
            "reverse",
            "-73.989,40.733",
            "--types",
            "secondary_address",
        ])
        .unwrap();
        let Commands::Reverse { types, .. } = cli.command else {
            panic!("expected reverse command");
        };
        assert_eq!(types, vec![FeatureType::SecondaryAddress]);
    }

    #[test]
    fn parses_reverse_point() {
        let cli =
            Cli::try_parse_from(["mapbox_cli", "--json", "reverse", "-73.989,40.733"]).unwrap();
        assert!(cli.json);
        let Commands::Reverse { point, .. } = cli.command else {
            panic!("expected reverse command");
        };
        assert!((point.lat - 40.733).abs() < 1e-9);
    }
}
