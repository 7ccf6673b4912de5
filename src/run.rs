//! Run driver.
//!
//! One run is strictly sequential: index the listing, extract each article
//! in discovery order, write the CSV, then optionally upload it. Only the
//! listing fetch and the CSV write can fail the run. Article failures become
//! placeholder rows and a failed upload is logged and ignored.

use crate::config::Settings;
use crate::error::ScrapeError;
use crate::http::Fetcher;
use crate::models::{ArticleLink, ArticleRecord, ExtractionPath};
use crate::outputs::table;
use crate::outputs::upload::{ObjectStore, upload_best_effort};
use crate::scrapers::{article, listing};
use crate::utils::scraped_at_now;
use tracing::{debug, info, instrument, warn};

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub structured: usize,
    pub heuristic: usize,
    pub failed: usize,
    /// `None` when no upload was attempted.
    pub uploaded: Option<bool>,
}

impl RunSummary {
    fn count(&mut self, path: ExtractionPath) {
        self.records += 1;
        match path {
            ExtractionPath::Structured => self.structured += 1,
            ExtractionPath::Heuristic => self.heuristic += 1,
            ExtractionPath::Failed => self.failed += 1,
        }
    }
}

/// Extract every link, one at a time, producing one record per link.
#[instrument(level = "info", skip_all, fields(count = links.len()))]
pub async fn scrape_links<F: Fetcher>(
    fetcher: &F,
    links: &[ArticleLink],
) -> (Vec<ArticleRecord>, RunSummary) {
    let mut records = Vec::with_capacity(links.len());
    let mut summary = RunSummary::default();

    for (index, link) in links.iter().enumerate() {
        debug!(index, title = %link.title, href = %link.href, "Scraping article");
        let extraction = article::extract_article(fetcher, &link.absolute_url).await;
        if let Some(diagnostic) = &extraction.diagnostic {
            debug!(index, path = %extraction.path, %diagnostic, "Extraction diagnostic");
        }
        summary.count(extraction.path);
        records.push(ArticleRecord::new(link, extraction, scraped_at_now()));
    }

    info!(
        structured = summary.structured,
        heuristic = summary.heuristic,
        failed = summary.failed,
        "Scraped article contents"
    );
    (records, summary)
}

/// Run the whole pipeline against `settings`.
///
/// `store` is only used when `settings.upload` is set.
#[instrument(level = "info", skip_all)]
pub async fn run<F: Fetcher, S: ObjectStore>(
    fetcher: &F,
    store: Option<&S>,
    settings: &Settings,
) -> Result<RunSummary, ScrapeError> {
    let links = listing::index_articles(fetcher, settings).await?;
    if links.is_empty() {
        warn!(listing_url = %settings.listing_url, "No article links found");
    }

    let (records, mut summary) = scrape_links(fetcher, &links).await;
    table::write_records(&records, &settings.output_path).await?;
    info!(count = records.len(), path = %settings.output_path.display(), "Saved articles");

    if let (Some(store), Some(upload)) = (store, &settings.upload) {
        summary.uploaded = Some(upload_best_effort(store, upload, &settings.output_path).await);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadSettings;
    use crate::http::testing::StubFetcher;
    use crate::outputs::table::HEADER;
    use crate::outputs::upload::HttpObjectStore;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE: &str = r#"<html><head>
<script id="__NEXT_DATA__">{"props":{"article":{"publishTimeTh":"1 ม.ค. 2568 06:00 น.","content":[{"type":"paragraph","data":{"text":"เนื้อหา"}}]}}}</script>
</head><body></body></html>"#;

    fn listing(hrefs: &[&str]) -> String {
        let anchors = hrefs
            .iter()
            .map(|h| format!(r#"<a href="{h}" title="title {h}">x</a>"#))
            .collect::<String>();
        format!("<html><body>{anchors}</body></html>")
    }

    fn settings_in(dir: &tempfile::TempDir) -> Settings {
        Settings {
            output_path: dir.path().join("thairath_news.csv"),
            ..Settings::default()
        }
    }

    fn read_rows(settings: &Settings) -> Vec<csv::StringRecord> {
        let mut reader = csv::Reader::from_path(&settings.output_path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            HEADER.to_vec()
        );
        reader.records().collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[tokio::test]
    async fn test_timed_out_article_becomes_placeholder_row() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        let fetcher =
            StubFetcher::new().with_page(&settings.listing_url, &listing(&["/news/local/1"]));

        let summary = run(&fetcher, None::<&HttpObjectStore>, &settings)
            .await
            .unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.uploaded, None);

        let rows = read_rows(&settings);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(&row[0], "title /news/local/1");
        assert_eq!(&row[1], "https://www.thairath.co.th/news/local/1");
        assert!(!row[2].is_empty());
        assert_eq!(&row[3], "N/A");
        assert_eq!(&row[4], "N/A");
        assert_eq!(&row[5], "N/A");
    }

    #[tokio::test]
    async fn test_records_follow_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        let fetcher = StubFetcher::new()
            .with_page(
                &settings.listing_url,
                &listing(&["/news/b", "/news/a", "/news/b", "/news/c"]),
            )
            .with_page("https://www.thairath.co.th/news/a", ARTICLE);

        let summary = run(&fetcher, None::<&HttpObjectStore>, &settings)
            .await
            .unwrap();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.structured, 1);
        assert_eq!(summary.failed, 2);

        assert_eq!(
            fetcher.requested(),
            vec![
                settings.listing_url.clone(),
                "https://www.thairath.co.th/news/b".to_string(),
                "https://www.thairath.co.th/news/a".to_string(),
                "https://www.thairath.co.th/news/c".to_string(),
            ]
        );

        let rows = read_rows(&settings);
        let urls = rows.iter().map(|r| r[1].to_string()).collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://www.thairath.co.th/news/b",
                "https://www.thairath.co.th/news/a",
                "https://www.thairath.co.th/news/c",
            ]
        );
        assert_eq!(&rows[1][3], "1 ม.ค. 2568 06:00");
        assert_eq!(&rows[1][4], "เนื้อหา");
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        let fetcher = StubFetcher::new();

        let result = run(&fetcher, None::<&HttpObjectStore>, &settings).await;
        assert!(result.is_err());
        assert!(!settings.output_path.exists());
    }

    #[tokio::test]
    async fn test_empty_listing_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(&dir);
        let fetcher = StubFetcher::new().with_page(&settings.listing_url, "<html></html>");

        let summary = run(&fetcher, None::<&HttpObjectStore>, &settings)
            .await
            .unwrap();
        assert_eq!(summary.records, 0);
        assert!(read_rows(&settings).is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_does_not_fail_run() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let upload = UploadSettings {
            endpoint: server.uri(),
            bucket: "news-scrapes".to_string(),
            key_prefix: "thairath/".to_string(),
            token: None,
        };
        let settings = Settings {
            upload: Some(upload.clone()),
            ..settings_in(&dir)
        };
        let store = HttpObjectStore::new(&upload).unwrap();
        let fetcher = StubFetcher::new().with_page(&settings.listing_url, &listing(&[]));

        let summary = run(&fetcher, Some(&store), &settings).await.unwrap();
        assert_eq!(summary.uploaded, Some(false));
        assert!(settings.output_path.exists());
    }

    #[tokio::test]
    async fn test_successful_upload_reported() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let upload = UploadSettings {
            endpoint: server.uri(),
            bucket: "news-scrapes".to_string(),
            key_prefix: "thairath/".to_string(),
            token: None,
        };
        let settings = Settings {
            upload: Some(upload.clone()),
            ..settings_in(&dir)
        };
        let store = HttpObjectStore::new(&upload).unwrap();
        let fetcher = StubFetcher::new().with_page(&settings.listing_url, &listing(&[]));

        let summary = run(&fetcher, Some(&store), &settings).await.unwrap();
        assert_eq!(summary.uploaded, Some(true));
    }
}
