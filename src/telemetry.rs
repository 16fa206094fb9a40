//! Telemetry metric name constants.
//!
//! Centralised metric names for gateway operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `search_gateway_`. Counters end in
//! `_total`.
//!
//! # Common labels
//!
//! - `provider` — provider name (e.g. "exa")
//! - `operation` — operation invoked (currently always "search")
//! - `status` — outcome: "ok" or "error"

/// Total provider requests dispatched through the gateway.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "search_gateway_requests_total";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`, `operation`.
pub const RETRIES_TOTAL: &str = "search_gateway_retries_total";

/// Total query cache hits.
pub const CACHE_HITS_TOTAL: &str = "search_gateway_cache_hits_total";

/// Total query cache misses.
pub const CACHE_MISSES_TOTAL: &str = "search_gateway_cache_misses_total";

/// Total searches rejected by the sliding-window rate limiter.
pub const RATE_LIMITED_TOTAL: &str = "search_gateway_rate_limited_total";
