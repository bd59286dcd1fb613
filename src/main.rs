use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use weathergrid::{WeatherGridConfig, logging, web};

/// Weather dashboard proxy server
#[derive(Parser, Debug)]
#[command(name = "weathergrid")]
#[command(version, about = "Proxies weather, forecast, pollution, UV and geocoding APIs for the dashboard")]
struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, short, env = "WEATHERGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host, overrides the configuration
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the configuration
    #[arg(long, short)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        WeatherGridConfig::load_from_path(args.config).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    logging::init(&config.logging, args.verbose)?;
    info!(
        default_location = %config.defaults.city_name,
        "Starting weathergrid v{}",
        weathergrid::VERSION
    );

    if config.upstream.api_key.is_none() {
        warn!(
            "No upstream API key configured; set {} or upstream.api_key. Data endpoints will fail until it is set.",
            weathergrid::config::API_KEY_ENV
        );
    }

    web::run(&config).await
}
