//! HTTP fetch collaborator.
//!
//! [`Fetcher`] is the seam between scraping logic and the network. The real
//! implementation, [`ReqwestFetcher`], owns a client built once from
//! [`Settings`]: the browser-like header set and the per-request timeout are
//! fixed at construction and shared by every request in the run.

use crate::config::Settings;
use crate::error::ScrapeError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, instrument};

/// Something that can turn a URL into a page body.
pub trait Fetcher {
    /// GET `url` and return the decoded body.
    ///
    /// Non-success status codes are errors.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Headers sent with every request, mimicking a desktop browser.
pub fn browser_headers(user_agent: &str) -> Result<HeaderMap, ScrapeError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|e| ScrapeError::Header(e.to_string()))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("th,en-US;q=0.8,en;q=0.6"));
    Ok(headers)
}

/// [`Fetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: &Settings) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers(&settings.user_agent)?)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::from_reqwest(url, e))?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_with_timeout(timeout: Duration) -> ReqwestFetcher {
        let settings = Settings {
            timeout,
            ..Settings::default()
        };
        ReqwestFetcher::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html>ข่าว</html>", "text/html; charset=utf-8"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_with_timeout(Duration::from_secs(5));
        let body = fetcher
            .fetch(&format!("{}/news/", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>ข่าว</html>");

        let requests = server.received_requests().await.unwrap();
        let headers = &requests[0].headers;
        assert_eq!(headers.get("user-agent").unwrap(), DEFAULT_USER_AGENT);
        assert!(headers.get("accept-language").is_some());
    }

    #[tokio::test]
    async fn test_fetch_fails_on_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = fetcher_with_timeout(Duration::from_secs(5));
        let err = fetcher
            .fetch(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let fetcher = fetcher_with_timeout(Duration::from_millis(200));
        let err = fetcher
            .fetch(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Timeout { .. }), "got {err:?}");
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        assert!(matches!(
            browser_headers("bad\nagent"),
            Err(ScrapeError::Header(_))
        ));
    }
}
