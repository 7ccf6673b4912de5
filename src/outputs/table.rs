//! CSV table output.
//!
//! All records from a run are serialized in one go once scraping finishes.
//! The header row is always written, so a run that found no articles still
//! produces a well-formed (empty) table.
//!
//! # Columns
//!
//! ```text
//! title,url,scraped_at,published,content,tags
//! ```

use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Column order of the output file.
pub const HEADER: [&str; 6] = ["title", "url", "scraped_at", "published", "content", "tags"];

/// Serialize records, header first, into an in-memory CSV document.
pub fn to_csv_bytes(records: &[ArticleRecord]) -> Result<Vec<u8>, ScrapeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| ScrapeError::Io(e.into_error()))
}

/// Write records to `path`, creating parent directories and replacing any
/// existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_records(records: &[ArticleRecord], path: &Path) -> Result<(), ScrapeError> {
    let bytes = to_csv_bytes(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, &bytes).await?;

    info!(bytes = bytes.len(), "Wrote CSV");
    Ok(())
}
