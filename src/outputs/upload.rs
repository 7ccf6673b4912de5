//! Object store upload.
//!
//! After the CSV is written it is pushed to an object store with a plain HTTP
//! `PUT {endpoint}/{bucket}/{key}`, which S3-compatible gateways and most
//! self-hosted stores accept. Each run overwrites the same key.
//!
//! Uploading is best-effort: [`upload_best_effort`] logs a failure and lets
//! the run finish successfully.

use crate::config::UploadSettings;
use crate::error::ScrapeError;
use crate::utils::truncate_for_log;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use tracing::{error, info, instrument};

/// A remote store that files can be written to.
pub trait ObjectStore {
    /// Store the file at `path` under `key`, replacing any existing object.
    async fn put_file(&self, path: &Path, key: &str) -> Result<(), ScrapeError>;
}

/// [`ObjectStore`] speaking path-style HTTP PUT.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(settings: &UploadSettings) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            bucket: settings.bucket.clone(),
            token: settings.token.clone(),
        })
    }

    pub fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            self.bucket,
            key.trim_start_matches('/')
        )
    }
}

impl ObjectStore for HttpObjectStore {
    #[instrument(level = "info", skip(self), fields(bucket = %self.bucket))]
    async fn put_file(&self, path: &Path, key: &str) -> Result<(), ScrapeError> {
        let body = tokio::fs::read(path).await?;
        let url = self.object_url(key);
        let bytes = body.len();

        let mut request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "text/csv; charset=utf-8")
            .body(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ScrapeError::from_reqwest(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Upload(format!(
                "{url} returned HTTP {status}: {}",
                truncate_for_log(&detail, 200)
            )));
        }

        info!(%url, bytes, "Uploaded file");
        Ok(())
    }
}

/// Upload `path` under the configured key, logging instead of failing.
///
/// Returns whether the upload succeeded.
pub async fn upload_best_effort<S: ObjectStore>(
    store: &S,
    settings: &UploadSettings,
    path: &Path,
) -> bool {
    let key = settings.object_key(path);
    match store.put_file(path, &key).await {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, %key, "Upload failed; local file kept");
            false
        }
    }
}
