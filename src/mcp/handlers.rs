//! MCP route handlers
//!
//! Terminates HTTP for the JSON-RPC endpoint and hands bodies to the shared
//! [`Dispatcher`](super::dispatcher::Dispatcher).

use super::dispatcher::DispatchReply;
use crate::state::SharedState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tracing::debug;

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/mcp", any(handle_mcp))
        .route("/mcp/", any(handle_mcp)) // Trailing slash safety
}

/// Transport-level rejection; JSON-RPC errors never take this path.
fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Endpoint: /mcp
/// Accepts only `POST` with a JSON content type; everything past that check is
/// answered as JSON-RPC over HTTP 200 (or 204 for notifications).
async fn handle_mcp(
    State(state): State<SharedState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        debug!(%method, "rejecting non-POST request to /mcp");
        return bad_request("Use POST for JSON-RPC requests");
    }
    if !is_json(&headers) {
        debug!("rejecting /mcp request without a JSON content type");
        return bad_request("Content-Type must be application/json");
    }

    match state.dispatcher.handle_body(&body).await {
        DispatchReply::Message(envelope) => Json(envelope).into_response(),
        DispatchReply::Ack => StatusCode::NO_CONTENT.into_response(),
    }
}
