//! Run configuration.
//!
//! [`Settings`] is built once in `main` and handed to each collaborator by
//! reference. Values come from three layers, later ones winning:
//!
//! 1. Built-in defaults targeting thairath.co.th
//! 2. An optional YAML file (`--config`)
//! 3. Command-line flags and their environment variables

use crate::cli::Cli;
use crate::error::ScrapeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.thairath.co.th";
pub const DEFAULT_LISTING_URL: &str = "https://www.thairath.co.th/news/";
pub const DEFAULT_LINK_PREFIX: &str = "/news/";
pub const DEFAULT_OUTPUT_PATH: &str = "thairath_news.csv";
pub const DEFAULT_BUCKET: &str = "news-scrapes";
pub const DEFAULT_KEY_PREFIX: &str = "thairath/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Site root that relative article links resolve against.
    pub base_url: String,
    pub listing_url: String,
    /// Only anchors whose `href` starts with this are treated as articles.
    pub link_prefix: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub output_path: PathBuf,
    /// `None` disables the upload step.
    pub upload: Option<UploadSettings>,
}

/// Where the finished CSV is pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSettings {
    pub endpoint: String,
    pub bucket: String,
    pub key_prefix: String,
    pub token: Option<String>,
}

impl UploadSettings {
    /// Object key for a local file: the key prefix followed by its file name.
    pub fn object_key(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
        format!("{}{}", self.key_prefix, name)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            upload: None,
        }
    }
}

/// On-disk shape of the YAML config. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub listing_url: Option<String>,
    pub link_prefix: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_path: Option<PathBuf>,
    pub upload: Option<FileUploadConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileUploadConfig {
    pub endpoint: Option<String>,
    pub bucket: Option<String>,
    pub key_prefix: Option<String>,
    pub token: Option<String>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ScrapeError> {
        Ok(serde_yaml::from_str(text)?)
    }

    #[instrument(level = "info")]
    pub async fn load(path: &Path) -> Result<Self, ScrapeError> {
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}

impl Settings {
    /// Layer a config file and the CLI over the defaults.
    pub fn resolve(file: FileConfig, cli: &Cli) -> Self {
        let defaults = Settings::default();
        let file_upload = file.upload.unwrap_or_default();

        let endpoint = cli.store_endpoint.clone().or(file_upload.endpoint);
        let upload = match endpoint {
            Some(endpoint) if !cli.no_upload => Some(UploadSettings {
                endpoint,
                bucket: cli
                    .store_bucket
                    .clone()
                    .or(file_upload.bucket)
                    .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                key_prefix: file_upload
                    .key_prefix
                    .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
                token: cli.store_token.clone().or(file_upload.token),
            }),
            _ => None,
        };

        let settings = Settings {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            listing_url: cli
                .listing_url
                .clone()
                .or(file.listing_url)
                .unwrap_or(defaults.listing_url),
            link_prefix: file.link_prefix.unwrap_or(defaults.link_prefix),
            user_agent: file.user_agent.unwrap_or(defaults.user_agent),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            output_path: cli
                .output
                .clone()
                .or(file.output_path)
                .unwrap_or(defaults.output_path),
            upload,
        };
        debug!(?settings, "Resolved settings");
        settings
    }
}
