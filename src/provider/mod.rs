//! Search provider abstraction.
//!
//! [`SearchProvider`] is the seam between the gateway and the outside
//! world. Production uses [`ExaClient`]; tests substitute mock
//! implementations to observe call counts and inject failures.

mod exa;

pub use exa::ExaClient;

use async_trait::async_trait;

use crate::error::Result;

/// A raw result as returned by a provider, before truncation and
/// placeholder substitution.
///
/// Every field except `url` may be absent; `published_date` in
/// particular is frequently missing.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub title: Option<String>,
    pub url: String,
    pub text: Option<String>,
    pub published_date: Option<String>,
}

/// An outbound neural search call.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging and metric labels.
    fn name(&self) -> &str;

    /// Perform a search, optionally fetching page text for each result.
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        include_text: bool,
    ) -> Result<Vec<ProviderResult>>;
}
