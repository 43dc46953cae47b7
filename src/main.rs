use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use apps_scraper::{supported_stores, AppRecord, AppsScraper, ExtractionRequest, ScraperConfig};

#[derive(Debug, Parser)]
#[command(name = "apps-scraper", about = "Extract listing data for one mobile app")]
struct Args {
    /// Package name (Google Play) or numeric id (App Store)
    app_id: String,

    /// Store key; detected from the app id when omitted
    #[arg(long)]
    store: Option<String>,

    /// Accept-Language value sent with the request
    #[arg(long, env = "APPS_SCRAPER_LOCALE")]
    locale: Option<String>,

    /// Configuration file (defaults to ./apps_scraper.toml when present)
    #[arg(long)]
    config: Option<String>,

    /// Previously stored record (JSON) to check for staleness
    #[arg(long)]
    previous: Option<String>,

    /// Report every recorded error as it happens
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("apps_scraper=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = ScraperConfig::load(args.config.as_deref())?;
    config.debug |= args.debug;

    let scraper = AppsScraper::new(&config)?;

    let mut request = ExtractionRequest::new(args.app_id);
    request.store = args.store;
    request.locale = args.locale;

    let attempt = scraper.extract(&request).await;

    if !attempt.is_success() {
        for message in attempt.error_messages() {
            error!("{}", message);
        }
        error!("Supported stores: {}", supported_stores().join(", "));
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", serde_json::to_string_pretty(attempt.record())?);

    if let Some(path) = args.previous {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read previous record {}", path))?;
        let previous: AppRecord = serde_json::from_str(&content)
            .with_context(|| format!("Invalid previous record {}", path))?;

        if attempt.compare_data(&previous) {
            info!("Stored record is up to date");
        } else {
            info!(
                "Stored record is stale, changed fields: {}",
                attempt.record().diff(&previous).join(", ")
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
