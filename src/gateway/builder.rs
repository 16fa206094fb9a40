//! Builder for configuring gateway instances.

use std::sync::Arc;
use std::time::Duration;

use super::SearchGateway;
use crate::cache::{CacheConfig, QueryCache};
use crate::limiter::{LimiterConfig, SlidingWindowLimiter};
use crate::provider::{ExaClient, SearchProvider};
use crate::retry::RetryConfig;

/// Builder for configuring [`SearchGateway`] instances.
///
/// ```rust
/// # use search_gateway::SearchGateway;
/// # use std::time::Duration;
/// let gateway = SearchGateway::builder()
///     .api_key("exa-key")
///     .http_timeout(Duration::from_secs(10))
///     .build();
/// ```
pub struct SearchGatewayBuilder {
    api_key: Option<String>,
    provider: Option<Arc<dyn SearchProvider>>,
    cache: CacheConfig,
    limiter: LimiterConfig,
    retry: RetryConfig,
    http_timeout: Duration,
}

impl SearchGatewayBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            provider: None,
            cache: CacheConfig::default(),
            limiter: LimiterConfig::default(),
            retry: RetryConfig::default(),
            http_timeout: Duration::from_secs(30),
        }
    }

    /// Set the Exa API key. Without a key (and without an injected
    /// provider) the gateway serves cache hits only.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Inject a custom provider, overriding the key-based Exa client.
    /// Used by tests and by callers with their own provider wiring.
    pub fn provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Configure the query cache.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Configure the sliding-window rate limiter.
    pub fn limiter_config(mut self, config: LimiterConfig) -> Self {
        self.limiter = config;
        self
    }

    /// Configure retry behaviour for provider calls.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Set the timeout for each outbound HTTP request.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Build the gateway.
    pub fn build(self) -> SearchGateway {
        let provider = self.provider.or_else(|| {
            self.api_key.map(|key| {
                Arc::new(ExaClient::with_timeout(key, self.http_timeout))
                    as Arc<dyn SearchProvider>
            })
        });
        SearchGateway {
            provider,
            cache: QueryCache::new(&self.cache),
            limiter: SlidingWindowLimiter::new(&self.limiter),
            retry: self.retry,
        }
    }
}

impl Default for SearchGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
