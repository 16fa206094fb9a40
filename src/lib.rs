//! search-gateway — cached, rate-limited web search for tool-calling runtimes
//!
//! This crate wraps a hosted neural search provider (Exa) behind a
//! [`SearchGateway`] facade: a bounded TTL query cache, a sliding-window
//! rate limiter, and an exponential-backoff retry wrapper. It is the
//! tool-side boundary of a conversational assistant; the LLM runtime
//! supplies `(query, num_results, include_content)` from an interpreted
//! user utterance and receives a structured, JSON-serializable result.
//!
//! # Example
//!
//! ```rust,no_run
//! use search_gateway::SearchGateway;
//!
//! #[tokio::main]
//! async fn main() -> search_gateway::Result<()> {
//!     let gateway = SearchGateway::builder()
//!         .api_key("exa-your-key")
//!         .build();
//!
//!     let response = gateway
//!         .search("high protein vegetarian meals", 5, true)
//!         .await?;
//!
//!     for result in &response.results {
//!         println!("{} — {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Tool surface
//!
//! ```rust,no_run
//! use search_gateway::{SearchGateway, tool};
//! use serde_json::json;
//!
//! # async fn handle_tool_call(gateway: &SearchGateway) {
//! // Register tool::definition() with the model, then on a tool call:
//! let body = tool::invoke(gateway, &json!({"query": "vitamin d intake"})).await;
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod limiter;
pub mod provider;
pub mod retry;
pub mod telemetry;
pub mod tool;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, QueryCache};
pub use config::GatewayConfig;
pub use error::{Result, SearchError};
pub use gateway::{MAX_CONTENT_CHARS, MAX_TITLE_CHARS, SearchGateway, SearchGatewayBuilder};
pub use limiter::{LimiterConfig, SlidingWindowLimiter};
pub use provider::{ExaClient, ProviderResult, SearchProvider};
pub use retry::RetryConfig;
pub use types::{ErrorPayload, SearchResponse, SearchResultItem, Status};
