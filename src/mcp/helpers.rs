//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication
//! and OpenAI widget metadata construction.

use serde_json::{json, Map, Value};

/// Constructs the metadata required by the OpenAI widget system.
///
/// # Arguments
///
/// * `template_uri` - URI of the widget resource that renders the tool output.
/// * `invoking` / `invoked` - Status lines shown by the host while the tool runs.
pub fn widget_meta(template_uri: &str, invoking: &str, invoked: &str) -> Value {
    json!({
        "openai/outputTemplate": template_uri,
        "openai/toolInvocation/invoking": invoking,
        "openai/toolInvocation/invoked": invoked,
        "openai/widgetAccessible": true,
        "openai/resultCanProduceWidget": true,
    })
}

fn envelope(id: Option<Value>) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("jsonrpc".into(), json!("2.0"));
    // An absent id stays absent; an explicit null is echoed as null.
    if let Some(id) = id {
        body.insert("id".into(), id);
    }
    body
}

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
pub fn rpc_success(id: Option<Value>, result: Value) -> Value {
    let mut body = envelope(id);
    body.insert("result".into(), result);
    Value::Object(body)
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (`Some(Value::Null)` if unparseable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
/// * `data` – Optional structured detail.
pub fn rpc_error(
    id: Option<Value>,
    code: i32,
    message: impl Into<String>,
    data: Option<Value>,
) -> Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(data) = data {
        error["data"] = data;
    }

    let mut body = envelope(id);
    body.insert("error".into(), error);
    Value::Object(body)
}
