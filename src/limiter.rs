//! Sliding-window rate limiter for outbound provider calls.
//!
//! Caps outbound call volume to respect the provider's quota. Admission
//! counts the requests recorded within the trailing window ending now;
//! timestamps that have slid out of the window are pruned and forgotten.
//!
//! One admission is consumed per `search` call, never per retry attempt:
//! the backoff wrapper sits inside the admission, so retries do not
//! re-check or re-record.
//!
//! State is a `Mutex<VecDeque<Instant>>` shared process-wide. The facade
//! uses [`SlidingWindowLimiter::try_acquire`], which prunes, checks, and
//! records under a single lock acquisition so concurrent callers cannot
//! all pass the check and then collectively exceed the limit.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Configuration for the sliding-window limiter.
///
/// ```rust
/// # use search_gateway::LimiterConfig;
/// # use std::time::Duration;
/// let config = LimiterConfig::new()
///     .max_requests(10)
///     .window(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    /// Maximum admitted requests per window. Default: 20.
    pub max_requests: usize,
    /// Trailing window length. Default: 60 minutes.
    pub window: Duration,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window: Duration::from_secs(60 * 60),
        }
    }
}

impl LimiterConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum admitted requests per window.
    pub fn max_requests(mut self, n: usize) -> Self {
        self.max_requests = n;
        self
    }

    /// Set the trailing window length.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

/// Thread-safe sliding-window request counter.
pub struct SlidingWindowLimiter {
    requests: Mutex<VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl SlidingWindowLimiter {
    /// Create a limiter with the given configuration.
    pub fn new(config: &LimiterConfig) -> Self {
        Self {
            requests: Mutex::new(VecDeque::new()),
            max_requests: config.max_requests,
            window: config.window,
        }
    }

    /// Whether a request could be admitted right now.
    ///
    /// Prunes timestamps that fell out of the window, then compares the
    /// remaining count against the limit. Does not record anything.
    pub fn can_make_request(&self) -> bool {
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
        Self::prune(&mut requests, Instant::now(), self.window);
        requests.len() < self.max_requests
    }

    /// Record an admitted request.
    ///
    /// Call exactly once per admitted outbound call, after a successful
    /// admission check and before issuing the call.
    pub fn record_request(&self) {
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
        requests.push_back(Instant::now());
    }

    /// Check admission and record in one atomic step.
    ///
    /// Equivalent to `can_make_request` followed by `record_request`, but
    /// under a single lock acquisition, so two concurrent callers racing
    /// for the last slot cannot both win it.
    pub fn try_acquire(&self) -> bool {
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        Self::prune(&mut requests, now, self.window);
        if requests.len() < self.max_requests {
            requests.push_back(now);
            true
        } else {
            false
        }
    }

    /// Number of requests currently counted inside the window.
    pub fn admitted_in_window(&self) -> usize {
        let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
        Self::prune(&mut requests, Instant::now(), self.window);
        requests.len()
    }

    /// Drop timestamps older than the window. Entries are appended in
    /// time order, so pruning stops at the first one still inside.
    fn prune(requests: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(front) = requests.front() {
            if now.duration_since(*front) >= window {
                requests.pop_front();
            } else {
                break;
            }
        }
    }
}
