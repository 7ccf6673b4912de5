//! Thairath article extractor.
//!
//! Each article page is read in one of two ways, first match wins:
//!
//! 1. **Structured**: Thairath is a Next.js site, so most pages embed their
//!    hydration state in `<script id="__NEXT_DATA__">`. The article node is
//!    found with [`blob::locate`] and its paragraph blocks are read directly.
//! 2. **Heuristic**: If the script is missing, does not parse, or holds no
//!    article node, paragraphs, date and tags are scraped from the rendered
//!    HTML, with a regex scan of the whole page as a last resort for the date.
//!
//! Extraction never fails. A page that cannot be fetched produces an
//! all-unknown [`ExtractionResult`] carrying the error as its diagnostic.

use crate::blob::{self, CONTENT_KEY};
use crate::http::Fetcher;
use crate::models::{ExtractionPath, ExtractionResult, Field};
use crate::utils::{normalize_date, truncate_for_log};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Field on the article node holding the human-readable publish time.
pub const PUBLISH_KEY: &str = "publishTimeTh";

const PARAGRAPH_TYPE: &str = "paragraph";
const PARAGRAPH_SEPARATOR: &str = "\n\n";
const TAG_SEPARATOR: &str = ", ";

static NEXT_DATA: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script#__NEXT_DATA__").expect("valid selector"));

static BODY_PARAGRAPHS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[itemprop='articleBody'] p, div[class*='evs3ejl67'] p")
        .expect("valid selector")
});

static DATE_ELEMENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class*='e1qfz2z0']").expect("valid selector"));

static TAG_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class*='ev4lnf163'] a").expect("valid selector"));

const THAI_MONTHS: &[&str] = &[
    "มกราคม", "กุมภาพันธ์", "มีนาคม", "เมษายน", "พฤษภาคม", "มิถุนายน",
    "กรกฎาคม", "สิงหาคม", "กันยายน", "ตุลาคม", "พฤศจิกายน", "ธันวาคม",
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.",
    "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

/// Day, Thai month, year and clock time, e.g. "12 ม.ค. 2567 10:30".
static THAI_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    let months = THAI_MONTHS.iter().map(|m| regex::escape(m)).join("|");
    Regex::new(&format!(
        r"(?:^|\D)(\d{{1,2}})\s+({months})\s+(\d{{4}})\s+(\d{{1,2}}:\d{{2}})"
    ))
    .expect("valid date regex")
});

/// Why the structured path did not apply.
#[derive(Debug, Error)]
enum StructuredMiss {
    #[error("no __NEXT_DATA__ script")]
    NoScript,
    #[error("__NEXT_DATA__ is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no article node in __NEXT_DATA__")]
    NoArticleNode,
}

/// Fetch one article and extract (published, content, tags) from it.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract_article<F: Fetcher>(fetcher: &F, url: &str) -> ExtractionResult {
    match fetcher.fetch(url).await {
        Ok(html) => extract_from_html(&html),
        Err(e) => {
            error!(error = %e, "Article fetch failed; recording placeholders");
            ExtractionResult::failed(e.to_string())
        }
    }
}

/// Extract from an already-fetched page, structured path first.
pub fn extract_from_html(html: &str) -> ExtractionResult {
    let document = Html::parse_document(html);

    match extract_structured(&document) {
        Ok(result) => {
            info!(path = %result.path, "Extracted article");
            result
        }
        Err(miss) => {
            debug!(reason = %miss, "Structured data unavailable; falling back to HTML");
            let mut result = extract_heuristic(&document);
            result.diagnostic = Some(miss.to_string());
            info!(path = %result.path, "Extracted article");
            result
        }
    }
}

fn extract_structured(document: &Html) -> Result<ExtractionResult, StructuredMiss> {
    let script = document
        .select(&NEXT_DATA)
        .next()
        .ok_or(StructuredMiss::NoScript)?;
    let raw = script.text().collect::<String>();
    let tree: Value = serde_json::from_str(&raw)?;
    let node = blob::locate(&tree, blob::is_article_node).ok_or(StructuredMiss::NoArticleNode)?;

    let published = match node.get(PUBLISH_KEY) {
        Some(Value::String(s)) => normalize_date(Some(s.as_str())),
        Some(Value::Number(n)) => normalize_date(Some(n.to_string().as_str())),
        _ => Field::Unknown,
    };

    let paragraphs = node[CONTENT_KEY]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some(PARAGRAPH_TYPE))
        .filter_map(|block| block.pointer("/data/text").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .join(PARAGRAPH_SEPARATOR);
    let content = Field::from_text(paragraphs);
    debug!(content = %truncate_for_log(content.as_str(), 120), "Structured content");

    Ok(ExtractionResult {
        published,
        content,
        tags: extract_tags(document),
        path: ExtractionPath::Structured,
        diagnostic: None,
    })
}

fn extract_heuristic(document: &Html) -> ExtractionResult {
    let paragraphs = document
        .select(&BODY_PARAGRAPHS)
        .map(element_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .join(PARAGRAPH_SEPARATOR);
    let content = Field::from_text(paragraphs);

    let mut published = document
        .select(&DATE_ELEMENT)
        .next()
        .map(|el| normalize_date(Some(element_text(el).as_str())))
        .unwrap_or_default();
    if !published.is_known() {
        published = scan_for_date(document);
    }

    ExtractionResult {
        published,
        content,
        tags: extract_tags(document),
        path: ExtractionPath::Heuristic,
        diagnostic: None,
    }
}

/// Look for a Thai date anywhere in the page text.
fn scan_for_date(document: &Html) -> Field {
    let text = document.root_element().text().join(" ");
    let found = THAI_DATE_RE.captures(&text).map(|caps| {
        format!("{} {} {} {}", &caps[1], &caps[2], &caps[3], &caps[4])
    });
    debug!(found = ?found, "Scanned page text for a date");
    normalize_date(found.as_deref())
}

/// Tag labels from the tag container, or unknown when there are none.
fn extract_tags(document: &Html) -> Field {
    let tags = document
        .select(&TAG_ANCHORS)
        .map(element_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .join(TAG_SEPARATOR);
    Field::from_text(tags)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
