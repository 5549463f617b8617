//! Service endpoints outside the JSON-RPC surface: health, info and the 404
//! fallback.

use crate::mcp::models::{ToolDescriptor, PROTOCOL_VERSION};
use crate::state::SharedState;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// Creates routes for health and server info
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/health", any(health))
        .route("/", any(info))
        .route("/info", any(info))
}

/// Endpoint: /health
async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.server_info().name,
        "widget_url": state.widget_url,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Endpoint: GET / and GET /info
async fn info(State(state): State<SharedState>, method: Method) -> Response {
    if method != Method::GET {
        return not_found().await.into_response();
    }

    let server = state.server_info();
    let tools: Vec<Value> = state
        .dispatcher
        .registry()
        .list()
        .iter()
        .map(tool_summary)
        .collect();

    Json(json!({
        "name": server.name,
        "version": server.version,
        "protocolVersion": PROTOCOL_VERSION,
        "tools": tools,
        "widget_url": state.widget_url,
        "endpoints": {
            "mcp": "/mcp",
            "health": "/health",
        },
    }))
    .into_response()
}

fn tool_summary(tool: &ToolDescriptor) -> Value {
    let mut summary = json!({
        "name": tool.name,
        "description": tool.description,
    });
    if let Some(title) = &tool.title {
        summary["title"] = json!(title);
    }
    summary
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
