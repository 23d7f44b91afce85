//! Web search: SerpApi client and the candidate social-media search built on it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod candidate;

pub const SERP_API_URL: &str = "https://serpapi.com/search.json";
const SEARCH_ENGINE: &str = "google";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Search response has no organic results: {0}")]
    MissingResults(String),
}

/// One organic search hit. Only the fields Scout reads are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    organic_results: Option<Vec<SearchResult>>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl SerpApiClient {
    pub fn new(api_key: String) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint: SERP_API_URL.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearch for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", SEARCH_ENGINE),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<SerpResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SerpResponse = response.json().await?;
        parse_organic_results(body)
    }
}

fn parse_organic_results(body: SerpResponse) -> Result<Vec<SearchResult>, SearchError> {
    match body.organic_results {
        Some(results) => Ok(results),
        None => Err(SearchError::MissingResults(
            body.error.unwrap_or_else(|| "no error message".to_string()),
        )),
    }
}
