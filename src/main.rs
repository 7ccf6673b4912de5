//! # Thairath Scraper
//!
//! A single-run batch job that scrapes the Thairath news listing, extracts
//! each article's publish time, body text and tags, and writes them to a CSV
//! file, optionally uploading that file to an object store.
//!
//! ## Usage
//!
//! ```sh
//! thairath_scraper -o ./thairath_news.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a sequential pipeline:
//! 1. **Indexing**: Discover article links on the listing page
//! 2. **Extraction**: Fetch each article and read its embedded `__NEXT_DATA__`
//!    JSON, falling back to CSS selectors when that is unavailable
//! 3. **Output**: Write one CSV row per article
//! 4. **Upload**: Push the CSV to an object store (best-effort, if configured)

use clap::Parser;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod blob;
mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod run;
mod scrapers;
mod utils;

use cli::Cli;
use config::{FileConfig, Settings};
use http::ReqwestFetcher;
use outputs::upload::HttpObjectStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!("thairath_scraper starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file_config, &args);
    info!(
        listing_url = %settings.listing_url,
        output = %settings.output_path.display(),
        upload = settings.upload.is_some(),
        "Configuration resolved"
    );

    let fetcher = ReqwestFetcher::new(&settings)?;
    let store = settings
        .upload
        .as_ref()
        .map(HttpObjectStore::new)
        .transpose()?;

    let summary = run::run(&fetcher, store.as_ref(), &settings).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        records = summary.records,
        structured = summary.structured,
        heuristic = summary.heuristic,
        failed = summary.failed,
        uploaded = ?summary.uploaded,
        "Execution complete"
    );

    Ok(())
}
