//! Environment-driven configuration.
//!
//! All knobs have defaults; only `EXA_API_KEY` gates functionality. A
//! gateway built without a key still serves cache hits and fails fresh
//! searches with `ProviderUnavailable`, without touching the network.
//!
//! Recognised variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `EXA_API_KEY` | unset (no provider) |
//! | `SEARCH_CACHE_MAX_ENTRIES` | 100 |
//! | `SEARCH_CACHE_TTL_HOURS` | 24 |
//! | `SEARCH_RATE_LIMIT_MAX_REQUESTS` | 20 |
//! | `SEARCH_RATE_LIMIT_WINDOW_MINUTES` | 60 |
//! | `SEARCH_RETRY_MAX_ATTEMPTS` | 3 |
//! | `SEARCH_HTTP_TIMEOUT_SECS` | 30 |

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::limiter::LimiterConfig;
use crate::retry::RetryConfig;

/// Aggregate configuration for a [`SearchGateway`](crate::SearchGateway).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Exa API key. `None` means no provider is configured.
    pub api_key: Option<String>,
    pub cache: CacheConfig,
    pub limiter: LimiterConfig,
    pub retry: RetryConfig,
    /// Timeout applied to each outbound HTTP request.
    pub http_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cache: CacheConfig::default(),
            limiter: LimiterConfig::default(),
            retry: RetryConfig::default(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl GatewayConfig {
    /// Build a config from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let api_key = std::env::var("EXA_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let mut cache = CacheConfig::new();
        if let Some(n) = env_parse::<usize>("SEARCH_CACHE_MAX_ENTRIES") {
            cache = cache.max_entries(n);
        }
        if let Some(hours) = env_parse::<u64>("SEARCH_CACHE_TTL_HOURS") {
            cache = cache.ttl(Duration::from_secs(hours * 3600));
        }

        let mut limiter = LimiterConfig::new();
        if let Some(n) = env_parse::<usize>("SEARCH_RATE_LIMIT_MAX_REQUESTS") {
            limiter = limiter.max_requests(n);
        }
        if let Some(minutes) = env_parse::<u64>("SEARCH_RATE_LIMIT_WINDOW_MINUTES") {
            limiter = limiter.window(Duration::from_secs(minutes * 60));
        }

        let mut retry = RetryConfig::new();
        if let Some(n) = env_parse::<u32>("SEARCH_RETRY_MAX_ATTEMPTS") {
            retry = retry.max_attempts(n);
        }

        let http_timeout = env_parse::<u64>("SEARCH_HTTP_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Self {
            api_key,
            cache,
            limiter,
            retry,
            http_timeout,
        }
    }
}

/// Read and parse an environment variable, warning (once, at load time)
/// when a set variable fails to parse.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}
