//! Caller-facing result shapes.
//!
//! These are the structures handed back to the tool-calling runtime.
//! [`SearchResponse`] is also the value serialized into the query cache,
//! so it derives both `Serialize` and `Deserialize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome marker on a [`SearchResponse`] or [`ErrorPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// A single web search result.
///
/// `title` and `content` carry placeholder text when the provider
/// returned nothing for the field; `published_date` is `"Not available"`
/// when the provider omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    pub url: String,
    pub content: String,
    pub published_date: String,
}

/// The complete response for one search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: Status,
    pub query: String,
    /// Number of results actually returned (may be fewer than requested).
    pub num_results: usize,
    pub results: Vec<SearchResultItem>,
    /// When the results were fetched from the provider. A cached response
    /// keeps the original fetch time.
    pub timestamp: DateTime<Utc>,
    /// Whether this response was served from the query cache.
    pub cached: bool,
}

/// Structured error payload returned across the tool boundary.
///
/// The tool surface never raises; every failure is rendered as one of
/// these, with enough context (`query`, `timestamp`) for the caller to
/// decide on retry or user messaging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub status: Status,
    pub error: String,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub cached: bool,
}

impl ErrorPayload {
    /// Build an error payload for `query` from any displayable error.
    pub fn new(query: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Error,
            error: error.to_string(),
            query: query.into(),
            timestamp: Utc::now(),
            cached: false,
        }
    }
}
