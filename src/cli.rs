//! Command-line interface definitions for the Thairath scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every flag is optional; anything left unset falls back to the config file
//! and then to the built-in defaults (see [`crate::config`]).

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Thairath scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape with defaults, writing thairath_news.csv
/// thairath_scraper
///
/// # Custom output and a YAML config
/// thairath_scraper -o /tmp/news.csv -c scraper.yaml
///
/// # Upload the result afterwards
/// STORE_ENDPOINT=http://localhost:9000 thairath_scraper --store-bucket news
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Listing page to discover articles from
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Object store endpoint; enables the upload step
    #[arg(long, env = "STORE_ENDPOINT")]
    pub store_endpoint: Option<String>,

    /// Object store bucket
    #[arg(long, env = "STORE_BUCKET")]
    pub store_bucket: Option<String>,

    /// Bearer token for the object store
    #[arg(long, env = "STORE_TOKEN", hide_env_values = true)]
    pub store_token: Option<String>,

    /// Skip the upload even if an endpoint is configured
    #[arg(long)]
    pub no_upload: bool,
}
