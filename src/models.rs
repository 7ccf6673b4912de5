//! Data models for scraped articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Field`]: A scraped value that may be unknown
//! - [`ArticleLink`]: An article discovered on the listing page
//! - [`ExtractionResult`]: What the article extractor recovered from one page
//! - [`ArticleRecord`]: One output row, the union of the two plus a capture time

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder written wherever a value could not be determined.
pub const SENTINEL: &str = "N/A";

/// A scraped value that is either known or could not be determined.
///
/// `Unknown` renders (and serializes) as [`SENTINEL`], so the output file keeps
/// the familiar `"N/A"` placeholder while the code never has to compare
/// against a magic string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field {
    Known(String),
    #[default]
    Unknown,
}

impl Field {
    /// Wrap `text`, treating blank text as [`Field::Unknown`].
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Field::Unknown
        } else {
            Field::Known(text)
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Field::Known(s) => s,
            Field::Unknown => SENTINEL,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An article link discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleLink {
    /// The anchor's `title` attribute.
    pub title: String,
    /// The relative path as it appeared in the `href` attribute.
    pub href: String,
    /// `href` resolved against the site base URL.
    pub absolute_url: String,
}

/// Which extraction strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionPath {
    /// Read from the embedded hydration JSON.
    Structured,
    /// Scraped from rendered HTML with CSS selectors.
    Heuristic,
    /// The page could not be fetched at all.
    Failed,
}

impl fmt::Display for ExtractionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionPath::Structured => "structured",
            ExtractionPath::Heuristic => "heuristic",
            ExtractionPath::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The (published, content, tags) triple recovered from one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub published: Field,
    /// Paragraphs joined by a blank line.
    pub content: Field,
    /// Tag labels joined by `", "`.
    pub tags: Field,
    pub path: ExtractionPath,
    /// Why extraction failed or degraded, if it did.
    pub diagnostic: Option<String>,
}

impl ExtractionResult {
    /// The all-unknown result returned when an article cannot be fetched.
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            published: Field::Unknown,
            content: Field::Unknown,
            tags: Field::Unknown,
            path: ExtractionPath::Failed,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// One row of the output table.
///
/// Field order here is the column order of the CSV file.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub scraped_at: String,
    pub published: Field,
    pub content: Field,
    pub tags: Field,
}

impl ArticleRecord {
    /// Combine a discovered link with what was extracted from its page.
    pub fn new(link: &ArticleLink, extraction: ExtractionResult, scraped_at: String) -> Self {
        Self {
            title: link.title.clone(),
            url: link.absolute_url.clone(),
            scraped_at,
            published: extraction.published,
            content: extraction.content,
            tags: extraction.tags,
        }
    }
}
