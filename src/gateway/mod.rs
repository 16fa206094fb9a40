//! The query facade.
//!
//! [`SearchGateway`] is the single entry point tying together the query
//! cache, the sliding-window limiter, the retry wrapper, and the
//! provider. Control flow for a call:
//!
//! caller → validate → cache lookup → \[miss\] → provider check →
//! limiter admission → retry-wrapped provider call → truncate →
//! cache insert → caller.
//!
//! The gateway is shared process-wide; callers typically hold it in an
//! `Arc`, one instance for all concurrent chat sessions. Two concurrent
//! identical queries may both miss and both fetch; the second cache
//! write overwrites the first (last-writer-wins), which is acceptable
//! because results for a given query are fungible.

mod builder;

pub use builder::SearchGatewayBuilder;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::cache::{self, QueryCache};
use crate::config::GatewayConfig;
use crate::error::{Result, SearchError};
use crate::limiter::SlidingWindowLimiter;
use crate::provider::{ExaClient, ProviderResult, SearchProvider};
use crate::retry::{RetryConfig, with_retry};
use crate::telemetry;
use crate::types::{SearchResponse, SearchResultItem, Status};

/// Maximum title length returned to the caller, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Maximum content snippet length returned to the caller, in characters.
/// Truncated snippets get an `...` suffix.
pub const MAX_CONTENT_CHARS: usize = 800;

const MIN_RESULTS: usize = 1;
const MAX_RESULTS: usize = 10;

/// Cached, rate-limited web search facade.
pub struct SearchGateway {
    provider: Option<Arc<dyn SearchProvider>>,
    cache: QueryCache,
    limiter: SlidingWindowLimiter,
    retry: RetryConfig,
}

impl SearchGateway {
    /// Create a builder for configuring a gateway.
    pub fn builder() -> SearchGatewayBuilder {
        SearchGatewayBuilder::new()
    }

    /// Build a gateway from environment variables.
    ///
    /// See [`GatewayConfig::from_env`] for the recognised variables.
    pub fn from_env() -> Self {
        Self::from_config(GatewayConfig::from_env())
    }

    /// Build a gateway from an explicit configuration.
    pub fn from_config(config: GatewayConfig) -> Self {
        let provider = config.api_key.as_deref().map(|key| {
            Arc::new(ExaClient::with_timeout(key, config.http_timeout)) as Arc<dyn SearchProvider>
        });
        Self {
            provider,
            cache: QueryCache::new(&config.cache),
            limiter: SlidingWindowLimiter::new(&config.limiter),
            retry: config.retry,
        }
    }

    /// Perform a web search.
    ///
    /// Validates and normalizes the input, serves repeated queries from
    /// the cache, and otherwise fetches from the provider under rate
    /// limiting and retry. `num_results` is clamped to `[1, 10]`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidInput`] — empty query after trimming;
    ///   checked before anything else, so no provider call is attempted
    ///   and no rate-limit slot is consumed.
    /// - [`SearchError::ProviderUnavailable`] — no API key configured.
    /// - [`SearchError::RateLimited`] — admission denied; not retried
    ///   here, the caller may try again later.
    /// - [`SearchError::Http`] / [`SearchError::Api`] — all retry
    ///   attempts exhausted; the last provider error, unmodified. Failed
    ///   searches are never cached.
    pub async fn search(
        &self,
        query: &str,
        num_results: usize,
        include_content: bool,
    ) -> Result<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }
        let num_results = num_results.clamp(MIN_RESULTS, MAX_RESULTS);
        let key = cache::query_key(query, num_results, include_content);

        if let Some(payload) = self.cache.get(key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
            debug!(query, "serving search from cache");
            let mut response: SearchResponse = serde_json::from_str(&payload)?;
            response.cached = true;
            return Ok(response);
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);

        // Checked before admission so a misconfigured deployment does
        // not burn rate-limit quota on calls that can never be issued.
        let Some(provider) = self.provider.as_ref() else {
            return Err(SearchError::ProviderUnavailable(
                "EXA_API_KEY is not configured".to_string(),
            ));
        };

        if !self.limiter.try_acquire() {
            metrics::counter!(telemetry::RATE_LIMITED_TOTAL).increment(1);
            warn!(query, "rate limit reached, rejecting search");
            return Err(SearchError::RateLimited);
        }

        info!(query, num_results, "performing web search");
        let raw = match with_retry(&self.retry, provider.name(), "search", || {
            provider.search(query, num_results, include_content)
        })
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "provider" => provider.name().to_owned(),
                    "status" => "error",
                )
                .increment(1);
                return Err(e);
            }
        };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "provider" => provider.name().to_owned(),
            "status" => "ok",
        )
        .increment(1);

        let results: Vec<SearchResultItem> = raw.into_iter().map(into_result_item).collect();
        let response = SearchResponse {
            status: Status::Success,
            query: query.to_string(),
            num_results: results.len(),
            results,
            timestamp: Utc::now(),
            cached: false,
        };

        self.cache.insert(key, serde_json::to_string(&response)?);
        info!(query, count = response.num_results, "web search completed");
        Ok(response)
    }
}

/// Shape a raw provider result for the caller: truncate long fields and
/// substitute placeholders for missing ones. Title and content budgets
/// are independent per-field limits, not a shared one.
fn into_result_item(raw: ProviderResult) -> SearchResultItem {
    let title = match raw.title.filter(|t| !t.is_empty()) {
        Some(t) => truncate_chars(&t, MAX_TITLE_CHARS, false),
        None => "No title".to_string(),
    };
    let content = match raw.text.filter(|t| !t.is_empty()) {
        Some(t) => truncate_chars(&t, MAX_CONTENT_CHARS, true),
        None => "No content available".to_string(),
    };
    SearchResultItem {
        title,
        url: raw.url,
        content,
        published_date: raw
            .published_date
            .unwrap_or_else(|| "Not available".to_string()),
    }
}

/// Truncate to `max_chars` characters (not bytes, to stay on char
/// boundaries), optionally appending an ellipsis when truncation occurred.
fn truncate_chars(s: &str, max_chars: usize, ellipsis: bool) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    if ellipsis {
        out.push_str("...");
    }
    out
}
