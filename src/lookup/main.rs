//! One-shot place lookup.
//!
//! Resolves a single query against the gazetteer and prints the same JSON
//! envelope the server would return.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use placefinder::api::PlacesResponse;
use placefinder::config::Config;
use placefinder::gazetteer::OsNamesClient;
use placefinder::matching::MatchFilter;
use placefinder::{LocationType, QueryInput, Resolver};

#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Resolve a UK place name or partial postcode")]
struct Args {
    /// Place name or partial postcode
    query: String,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OS Names API key (overrides config)
    #[arg(long, env = "OS_NAMES_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Location type to resolve against
    #[arg(long, default_value = "uk-location")]
    location_type: String,

    /// Longest input treated as a partial postcode (overrides config)
    #[arg(long)]
    max_postcode_length: Option<usize>,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config =
        Config::load_or_default(args.config.as_ref()).context("Failed to load config")?;
    if let Some(api_key) = args.api_key {
        config.gazetteer.api_key = Some(api_key);
    }
    if let Some(max) = args.max_postcode_length {
        config.gazetteer.max_postcode_length = max;
    }

    let gazetteer =
        OsNamesClient::new(&config.gazetteer).context("Failed to create gazetteer client")?;
    let resolver = Resolver::new(
        Arc::new(gazetteer),
        MatchFilter::new(config.gazetteer.max_postcode_length),
    );

    let location_type = LocationType::parse(&args.location_type);
    let resolution = resolver
        .resolve_place(&QueryInput::from(args.query.as_str()), &location_type)
        .await;

    if let Some(entries) = resolution.entries() {
        info!("Resolved {} entries", entries.len());
    }

    let response = PlacesResponse::from(resolution);
    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
