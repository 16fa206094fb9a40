//! Facade behaviour tests: cache/limiter/retry composition, input
//! validation, truncation, and error propagation. Provider calls are
//! observed through a mock [`SearchProvider`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use search_gateway::{
    LimiterConfig, ProviderResult, Result, RetryConfig, SearchError, SearchGateway,
    SearchProvider, Status,
};

/// Mock provider that fails N times then succeeds, recording each call.
struct FailThenSucceed {
    fail_count: AtomicU32,
    fail_with: fn() -> SearchError,
    total_calls: AtomicU32,
    last_num_results: AtomicUsize,
    text: String,
}

impl FailThenSucceed {
    fn new(failures: u32, fail_with: fn() -> SearchError) -> Self {
        Self::with_text(failures, fail_with, "some page text")
    }

    fn with_text(failures: u32, fail_with: fn() -> SearchError, text: &str) -> Self {
        Self {
            fail_count: AtomicU32::new(failures),
            fail_with,
            total_calls: AtomicU32::new(0),
            last_num_results: AtomicUsize::new(0),
            text: text.to_string(),
        }
    }

    fn always_succeeds() -> Self {
        Self::new(0, || SearchError::Http("unused".into()))
    }

    fn call_count(&self) -> u32 {
        self.total_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SearchProvider for FailThenSucceed {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        query: &str,
        num_results: usize,
        _include_text: bool,
    ) -> Result<Vec<ProviderResult>> {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.last_num_results.store(num_results, Ordering::Relaxed);
        let remaining = self.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_count.fetch_sub(1, Ordering::Relaxed);
            return Err((self.fail_with)());
        }
        Ok(vec![ProviderResult {
            title: Some(format!("Result for {query}")),
            url: "https://example.com".to_string(),
            text: Some(self.text.clone()),
            published_date: Some("2024-01-01".to_string()),
        }])
    }
}

fn gateway_with(provider: Arc<FailThenSucceed>) -> SearchGateway {
    SearchGateway::builder()
        .provider(provider)
        .retry_config(RetryConfig::new().initial_delay(Duration::from_millis(1)))
        .build()
}

// =========================================================================
// Caching
// =========================================================================

#[tokio::test]
async fn repeated_query_is_served_from_cache() {
    let provider = Arc::new(FailThenSucceed::always_succeeds());
    let gateway = gateway_with(provider.clone());

    let first = gateway.search("Protein Intake", 5, true).await.unwrap();
    assert_eq!(first.status, Status::Success);
    assert!(!first.cached);

    // Case/whitespace variant of the same request: zero provider calls.
    let second = gateway.search("  protein intake ", 5, true).await.unwrap();
    assert!(second.cached);
    assert_eq!(second.results, first.results);
    assert_eq!(second.timestamp, first.timestamp);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn different_params_bypass_cache() {
    let provider = Arc::new(FailThenSucceed::always_succeeds());
    let gateway = gateway_with(provider.clone());

    gateway.search("protein intake", 5, true).await.unwrap();
    gateway.search("protein intake", 6, true).await.unwrap();
    gateway.search("protein intake", 5, false).await.unwrap();

    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn failed_search_is_not_cached() {
    let provider = Arc::new(FailThenSucceed::new(3, || SearchError::Api {
        status: 503,
        message: "unavailable".into(),
    }));
    let gateway = gateway_with(provider.clone());

    // Three attempts, all fail: error propagates.
    let err = gateway.search("creatine", 5, true).await.unwrap_err();
    assert!(matches!(err, SearchError::Api { status: 503, .. }));
    assert_eq!(provider.call_count(), 3);

    // The failure was not cached: the next call reaches the provider
    // (now out of failures) and succeeds.
    let response = gateway.search("creatine", 5, true).await.unwrap();
    assert!(!response.cached);
    assert_eq!(provider.call_count(), 4);
}

// =========================================================================
// Validation
// =========================================================================

#[tokio::test]
async fn empty_query_is_rejected_before_any_side_effect() {
    let provider = Arc::new(FailThenSucceed::always_succeeds());
    let gateway = SearchGateway::builder()
        .provider(provider.clone())
        .limiter_config(LimiterConfig::new().max_requests(1))
        .build();

    let err = gateway.search("   ", 5, true).await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidInput(_)));
    assert_eq!(provider.call_count(), 0);

    // No admission was recorded: the single rate-limit slot is intact.
    gateway.search("real query", 5, true).await.unwrap();
}

#[tokio::test]
async fn num_results_is_clamped() {
    let provider = Arc::new(FailThenSucceed::always_succeeds());
    let gateway = gateway_with(provider.clone());

    gateway.search("too many", 50, true).await.unwrap();
    assert_eq!(provider.last_num_results.load(Ordering::Relaxed), 10);

    gateway.search("too few", 0, true).await.unwrap();
    assert_eq!(provider.last_num_results.load(Ordering::Relaxed), 1);
}

// =========================================================================
// Rate limiting
// =========================================================================

#[tokio::test]
async fn second_miss_within_window_is_rate_limited() {
    let provider = Arc::new(FailThenSucceed::always_succeeds());
    let gateway = SearchGateway::builder()
        .provider(provider.clone())
        .limiter_config(
            LimiterConfig::new()
                .max_requests(1)
                .window(Duration::from_secs(3600)),
        )
        .build();

    gateway.search("first query", 5, true).await.unwrap();

    let err = gateway.search("second query", 5, true).await.unwrap_err();
    assert!(matches!(err, SearchError::RateLimited));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn cache_hits_do_not_consume_rate_limit() {
    let provider = Arc::new(FailThenSucceed::always_succeeds());
    let gateway = SearchGateway::builder()
        .provider(provider.clone())
        .limiter_config(LimiterConfig::new().max_requests(1))
        .build();

    gateway.search("query", 5, true).await.unwrap();
    let cached = gateway.search("query", 5, true).await.unwrap();
    assert!(cached.cached);
}

// =========================================================================
// Retry
// =========================================================================

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_with_backoff() {
    // Fails twice, succeeds on the third attempt; two backoff delays
    // (100ms, then 200ms) must elapse.
    let provider = Arc::new(FailThenSucceed::new(2, || SearchError::Api {
        status: 503,
        message: "unavailable".into(),
    }));
    let gateway = SearchGateway::builder()
        .provider(provider.clone())
        .retry_config(
            RetryConfig::new()
                .max_attempts(3)
                .initial_delay(Duration::from_millis(100)),
        )
        .build();

    let start = tokio::time::Instant::now();
    let response = gateway.search("iron deficiency", 5, true).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(response.status, Status::Success);
    assert_eq!(provider.call_count(), 3);
    assert_eq!(elapsed, Duration::from_millis(300));
}

#[tokio::test]
async fn permanent_errors_are_not_retried() {
    let provider = Arc::new(FailThenSucceed::new(5, || SearchError::Api {
        status: 400,
        message: "bad request".into(),
    }));
    let gateway = gateway_with(provider.clone());

    let err = gateway.search("query", 5, true).await.unwrap_err();
    assert!(matches!(err, SearchError::Api { status: 400, .. }));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn retries_consume_a_single_rate_limit_slot() {
    // Three attempts inside one search must record one admission, not three.
    let provider = Arc::new(FailThenSucceed::new(2, || SearchError::Http("reset".into())));
    let gateway = SearchGateway::builder()
        .provider(provider.clone())
        .limiter_config(LimiterConfig::new().max_requests(2))
        .retry_config(
            RetryConfig::new()
                .max_attempts(3)
                .initial_delay(Duration::from_millis(1)),
        )
        .build();

    gateway.search("first", 5, true).await.unwrap();
    assert_eq!(provider.call_count(), 3);

    // One slot left out of two.
    gateway.search("second", 5, true).await.unwrap();
    let err = gateway.search("third", 5, true).await.unwrap_err();
    assert!(matches!(err, SearchError::RateLimited));
}

// =========================================================================
// Provider availability and result shaping
// =========================================================================

#[tokio::test]
async fn missing_provider_fails_fast() {
    let gateway = SearchGateway::builder().build();

    let err = gateway.search("query", 5, true).await.unwrap_err();
    assert!(matches!(err, SearchError::ProviderUnavailable(_)));
}

#[tokio::test]
async fn long_fields_are_truncated_per_field() {
    let provider = Arc::new(FailThenSucceed::with_text(
        0,
        || SearchError::Http("unused".into()),
        &"x".repeat(1000),
    ));
    let gateway = gateway_with(provider);

    let response = gateway
        .search(&format!("query {}", "t".repeat(300)), 5, true)
        .await
        .unwrap();
    let item = &response.results[0];

    assert_eq!(item.title.chars().count(), 200);
    assert!(!item.title.ends_with("..."));
    assert_eq!(item.content.chars().count(), 803);
    assert!(item.content.ends_with("..."));
}
