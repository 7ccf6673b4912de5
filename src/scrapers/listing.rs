//! Thairath listing scanner.
//!
//! Discovers article links on the news listing page. An anchor counts as an
//! article when its `href` starts with the configured prefix (`/news/`) and it
//! carries both a `title` and an `href`. Links are de-duplicated by `href`,
//! keeping the first occurrence, and resolved against the site base URL.

use crate::config::Settings;
use crate::error::ScrapeError;
use crate::http::Fetcher;
use crate::models::ArticleLink;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Fetch the listing page and return its article links in page order.
///
/// A failed listing fetch is returned as an error; there is nothing to
/// scrape without it.
#[instrument(level = "info", skip_all, fields(listing_url = %settings.listing_url))]
pub async fn index_articles<F: Fetcher>(
    fetcher: &F,
    settings: &Settings,
) -> Result<Vec<ArticleLink>, ScrapeError> {
    let base = Url::parse(&settings.base_url)?;
    let html = fetcher.fetch(&settings.listing_url).await?;
    let links = parse_listing(&html, &base, &settings.link_prefix);

    info!(count = links.len(), "Indexed Thairath article links");
    debug!(urls = ?links.iter().map(|l| &l.absolute_url).collect::<Vec<_>>(), "Article URLs");
    Ok(links)
}

/// Extract article links from listing HTML.
pub fn parse_listing(html: &str, base: &Url, prefix: &str) -> Vec<ArticleLink> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHORS)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if !href.starts_with(prefix) {
                return None;
            }
            let title = anchor.value().attr("title").map(str::trim).unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                debug!(%href, "Skipping anchor without title");
                return None;
            }
            Some((title.to_string(), href.to_string()))
        })
        .unique_by(|(_, href)| href.clone())
        .filter_map(|(title, href)| match base.join(&href) {
            Ok(resolved) => Some(ArticleLink {
                title,
                absolute_url: resolved.to_string(),
                href,
            }),
            Err(e) => {
                warn!(%href, error = %e, "Could not resolve article link");
                None
            }
        })
        .collect()
}
