//! Posting fetcher: liveness probe, page download and visible-text extraction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use scraper::Html;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);
const PAGE_TIMEOUT_SECS: u64 = 30;
/// Characters of page text handed to the location prompt.
pub const PAGE_TEXT_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Posting returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// True only when a HEAD request answers exactly 200 within the timeout.
    async fn is_url_active(&self, url: &str) -> bool;
    /// GETs the page body; any status other than 200 is an error.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

const USER_AGENT: &str = concat!("scout-job-qa/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    /// Follows redirects, for page downloads.
    client: Client,
    /// Never follows redirects: a moved posting is not a live one.
    probe_client: Client,
    liveness_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(liveness_timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(PAGE_TIMEOUT_SECS))
            .build()?;
        let probe_client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()?;
        Ok(Self {
            client,
            probe_client,
            liveness_timeout,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn is_url_active(&self, url: &str) -> bool {
        match self
            .probe_client
            .head(url)
            .timeout(self.liveness_timeout)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!("Liveness probe for {url} failed: {e}");
                false
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Joins every non-blank text node of the document, trimmed, with single spaces,
/// skipping script and style contents. Truncated to `limit` characters.
pub fn extract_visible_text(html: &str, limit: usize) -> String {
    let document = Html::parse_document(html);

    let strings: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()))
                .is_some_and(|name| matches!(name, "script" | "style" | "noscript" | "template"));
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect();

    strings.join(" ").chars().take(limit).collect()
}
