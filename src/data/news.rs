//! Backend client for the news digest
//!
//! Fetches `GET {base_url}/news` and parses the body into a `NewsSnapshot`.
//! The raw body is kept alongside the parsed value so the cache can store it
//! exactly as the backend sent it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::NewsSnapshot;

/// Path of the news resource relative to the backend base URL
const NEWS_PATH: &str = "/news";

/// Errors that can occur when fetching the news digest
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned HTTP {0}")]
    Status(StatusCode),

    /// Response body is not a valid news snapshot
    #[error("Failed to parse news response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A successfully fetched snapshot together with the body it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedNews {
    pub snapshot: NewsSnapshot,
    pub body: String,
}

impl FetchedNews {
    /// Parses a response body, keeping the body for caching
    pub fn from_body(body: String) -> Result<Self, serde_json::Error> {
        let snapshot = NewsSnapshot::from_json(&body)?;
        Ok(Self { snapshot, body })
    }
}

/// Anything that can produce a fresh news snapshot
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self) -> Result<FetchedNews, FetchError>;
}

/// Client for the news backend
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    /// Creates a client for the backend at `base_url`
    ///
    /// A trailing `/` on the base URL is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Full URL of the news resource
    pub fn news_url(&self) -> String {
        format!("{}{}", self.base_url, NEWS_PATH)
    }
}

#[async_trait]
impl NewsSource for NewsClient {
    async fn fetch_news(&self) -> Result<FetchedNews, FetchError> {
        let url = self.news_url();
        debug!(%url, "fetching news");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(FetchedNews::from_body(body)?)
    }
}
