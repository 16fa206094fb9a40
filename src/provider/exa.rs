//! Exa neural search API client.
//!
//! See: <https://docs.exa.ai/reference/search>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ProviderResult, SearchProvider};
use crate::error::{Result, SearchError};

/// Default base URL for the Exa API
const DEFAULT_BASE_URL: &str = "https://api.exa.ai";

/// Default request timeout. The Exa transport has no useful default of
/// its own, so an explicit bound keeps a hung call from pinning a
/// session indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Exa search API.
#[derive(Clone)]
pub struct ExaClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl ExaClient {
    /// Create a new Exa client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::build(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::build(api_key, DEFAULT_BASE_URL, timeout)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::build(api_key, base_url, DEFAULT_TIMEOUT)
    }

    fn build(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for ExaClient {
    fn name(&self) -> &str {
        "exa"
    }

    async fn search(
        &self,
        query: &str,
        num_results: usize,
        include_text: bool,
    ) -> Result<Vec<ProviderResult>> {
        let url = format!("{}/search", self.base_url);
        debug!(query, num_results, include_text, "sending search request");

        let request = ExaSearchRequest {
            query,
            num_results,
            contents: include_text.then_some(ContentsRequest { text: true }),
        };

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ExaSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .map(|r| ProviderResult {
                title: r.title,
                url: r.url,
                text: r.text,
                published_date: r.published_date,
            })
            .collect())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    num_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<ContentsRequest>,
}

#[derive(Serialize)]
struct ContentsRequest {
    text: bool,
}

#[derive(Deserialize)]
struct ExaSearchResponse {
    results: Vec<ExaResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExaResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
}
