//! Diagnostic tool: run one neighborhood analysis end to end against the
//! live geocoding and POI providers, with an in-memory cache.
//!
//! Usage: cargo run --bin analyze -- --address "Lac 2, Tunis"
//!        cargo run --bin analyze -- --lat 36.8625 --lng 10.2297

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use dari_common::{Config, GeoPoint};
use dari_neighborhood::{AnalyzerConfig, MemoryStore, NeighborhoodAnalyzer, OverpassSource};
use nominatim_client::NominatimClient;
use overpass_client::OverpassClient;

#[derive(Parser)]
#[command(about = "Run one neighborhood analysis against the live providers")]
struct Args {
    /// Free-text address of the property.
    #[arg(long, default_value = "Lac 2, Tunis")]
    address: String,

    /// Explicit latitude (skips geocoding when paired with --lng).
    #[arg(long)]
    lat: Option<f64>,

    /// Explicit longitude.
    #[arg(long)]
    lng: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("dari_neighborhood=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::ephemeral_from_env();

    let geocoder = Arc::new(NominatimClient::new(&config.nominatim_base_url));
    let source = Arc::new(OverpassSource::new(OverpassClient::new(
        &config.overpass_base_url,
    )));
    let store = Arc::new(MemoryStore::new());

    let analyzer = NeighborhoodAnalyzer::new(
        geocoder,
        source,
        store,
        AnalyzerConfig {
            default_region_center: config.default_region_center,
            drift_tolerance_deg: config.drift_tolerance_deg,
        },
    );

    let coordinates = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    let amenities = analyzer
        .analyze(Uuid::new_v4(), &args.address, coordinates)
        .await?;

    println!("{}", serde_json::to_string_pretty(&amenities)?);
    println!("\n{} amenities within the relevance radius", amenities.len());
    Ok(())
}
