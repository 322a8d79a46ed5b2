//! Place lookup server.
//!
//! Accepts typed locations from the citizen-facing form and answers with
//! matching gazetteer entries.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use placefinder::api::{build_router, AppState};
use placefinder::config::Config;
use placefinder::gazetteer::OsNamesClient;
use placefinder::matching::MatchFilter;
use placefinder::Resolver;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "UK place lookup server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// OS Names API URL (overrides config)
    #[arg(long, env = "OS_NAMES_API_URL")]
    api_url: Option<String>,

    /// OS Names API key (overrides config)
    #[arg(long, env = "OS_NAMES_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Origin allowed to call the API from a browser (overrides config)
    #[arg(long, env = "ALLOW_ORIGIN_URL")]
    allow_origin_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config =
        Config::load_or_default(args.config.as_ref()).context("Failed to load config")?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(api_url) = args.api_url {
        config.gazetteer.api_url = api_url;
    }
    if let Some(api_key) = args.api_key {
        config.gazetteer.api_key = Some(api_key);
    }
    if let Some(origin) = args.allow_origin_url {
        config.server.allow_origin_url = origin;
    }

    info!("Placefinder Server");
    info!("Gazetteer at {}", config.gazetteer.api_url);
    if config.gazetteer.api_key.is_none() {
        info!("No gazetteer API key configured");
    }

    let gazetteer =
        OsNamesClient::new(&config.gazetteer).context("Failed to create gazetteer client")?;
    let filter = MatchFilter::new(config.gazetteer.max_postcode_length);

    let state = Arc::new(AppState {
        resolver: Resolver::new(Arc::new(gazetteer), filter),
    });

    let app = build_router(state, &config.server.allow_origin_url)?;

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}
