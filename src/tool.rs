//! Function-tool surface for LLM tool-calling runtimes.
//!
//! Exposes the gateway as a single function tool: [`definition()`]
//! returns the JSON schema a runtime registers with the model, and
//! [`invoke()`] handles a tool call. `invoke` never returns an error —
//! every failure is rendered as a structured JSON error payload so the
//! model can relay it or retry.

use serde_json::{Value, json};
use tracing::error;

use crate::error::SearchError;
use crate::gateway::SearchGateway;
use crate::types::ErrorPayload;

/// Default result count when the model omits `num_results`.
const DEFAULT_NUM_RESULTS: usize = 5;

/// Function-tool schema for the web search tool.
pub fn definition() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": "web_search",
            "description": "Search the web for real-time information using a neural search engine. Useful for finding current nutrition trends, health information, recipes, and dietary advice.",
            "parameters": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query to find relevant information on the web"
                    },
                    "num_results": {
                        "type": "integer",
                        "description": "Number of search results to return (default: 5, max: 10)",
                        "default": 5
                    },
                    "include_content": {
                        "type": "boolean",
                        "description": "Whether to include the full text content of the pages (default: true)",
                        "default": true
                    }
                },
                "required": ["query"]
            }
        }
    })
}

/// Handle a tool call with the model-supplied arguments object.
///
/// Missing optional arguments take their schema defaults. Returns a
/// JSON string: either a serialized
/// [`SearchResponse`](crate::SearchResponse) or an [`ErrorPayload`].
pub async fn invoke(gateway: &SearchGateway, arguments: &Value) -> String {
    let query = arguments
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let num_results = arguments
        .get("num_results")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_NUM_RESULTS as u64) as usize;
    let include_content = arguments
        .get("include_content")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    match gateway.search(query, num_results, include_content).await {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "failed to serialize search response");
                error_json(query, &SearchError::Json(e))
            }
        },
        Err(e) => error_json(query, &e),
    }
}

/// Render an error as the structured payload the runtime expects.
fn error_json(query: &str, error: &SearchError) -> String {
    let payload = ErrorPayload::new(query, error);
    serde_json::to_string(&payload)
        .unwrap_or_else(|_| r#"{"status":"error","error":"internal serialization failure"}"#.to_string())
}
