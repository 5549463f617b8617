//! JSON-RPC dispatcher shared by every example app.
//!
//! Transport concerns (HTTP method, content type, CORS) live in
//! [`super::handlers`]; this type only sees request bodies and produces
//! exactly one reply per body.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

use super::error::RpcError;
use super::helpers::rpc_success;
use super::models::{JsonRpcRequest, RpcMethod, ServerInfo, PROTOCOL_VERSION};
use crate::tools::ToolRegistry;
use crate::widget::WidgetCatalog;

/// What the transport should send back.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchReply {
    /// A JSON-RPC response or error envelope.
    Message(Value),
    /// Notification accepted; nothing to return.
    Ack,
}

pub struct Dispatcher {
    server: ServerInfo,
    registry: Arc<ToolRegistry>,
    widgets: Arc<WidgetCatalog>,
    tool_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        server: ServerInfo,
        registry: Arc<ToolRegistry>,
        widgets: Arc<WidgetCatalog>,
        tool_timeout: Duration,
    ) -> Self {
        Self {
            server,
            registry,
            widgets,
            tool_timeout,
        }
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn widgets(&self) -> &WidgetCatalog {
        &self.widgets
    }

    /// Handles a raw request body.
    pub async fn handle_body(&self, body: &[u8]) -> DispatchReply {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                warn!(error = %e, "JSON-RPC body is not valid JSON");
                DispatchReply::Message(RpcError::Parse.to_envelope(Some(Value::Null)))
            }
        }
    }

    /// Handles an already-parsed request body.
    pub async fn handle_value(&self, body: Value) -> DispatchReply {
        let request = match JsonRpcRequest::from_value(body) {
            Ok(request) => request,
            Err((id, err)) => {
                warn!(error = %err, "rejecting JSON-RPC envelope");
                return DispatchReply::Message(err.to_envelope(id));
            }
        };

        info!(method = request.method.as_str(), id = ?request.id, "MCP call");

        if request.method.is_notification() {
            debug!(method = request.method.as_str(), "notification acknowledged");
            return DispatchReply::Ack;
        }

        let id = request.id.clone();
        let outcome = AssertUnwindSafe(self.dispatch(&request))
            .catch_unwind()
            .await;

        let envelope = match outcome {
            Ok(Ok(result)) => rpc_success(id, result),
            Ok(Err(err)) => {
                match &err {
                    RpcError::Internal { .. } => error!(error = %err, "request failed"),
                    RpcError::MethodNotFound(method) => warn!(%method, "unknown method"),
                    other => debug!(error = %other, "request rejected"),
                }
                err.to_envelope(id)
            }
            Err(panic) => {
                error!(
                    method = request.method.as_str(),
                    panic = %panic_message(&*panic),
                    "handler panicked"
                );
                RpcError::internal("Internal error").to_envelope(id)
            }
        };
        DispatchReply::Message(envelope)
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        match &request.method {
            RpcMethod::Initialize => Ok(self.initialize()),
            RpcMethod::Ping => Ok(json!({})),
            RpcMethod::ToolsList => Ok(json!({ "tools": self.registry.list() })),
            RpcMethod::ToolsCall => self.call_tool(request.params_object()?).await,
            RpcMethod::ResourcesList => Ok(json!({ "resources": self.widgets.resources() })),
            RpcMethod::ResourcesRead => self.read_resource(request.params_object()?).await,
            // Answered before dispatch; listed for exhaustiveness.
            RpcMethod::Initialized | RpcMethod::Notification(_) => Ok(json!({})),
            RpcMethod::Unknown(method) => Err(RpcError::MethodNotFound(method.clone())),
        }
    }

    /// Handles `initialize`. Stateless: no session is created.
    fn initialize(&self) -> Value {
        let mut capabilities = json!({
            "tools": { "listChanged": false }
        });
        if !self.widgets.resources().is_empty() {
            capabilities["resources"] = json!({ "listChanged": false, "subscribe": false });
        }

        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": capabilities,
            "serverInfo": self.server,
        })
    }

    /// Handles `tools/call`.
    async fn call_tool(&self, params: Map<String, Value>) -> Result<Value, RpcError> {
        let name = match params.get("name") {
            Some(Value::String(name)) => name.as_str(),
            _ => return Err(RpcError::InvalidParams("tool name is required".into())),
        };
        let args = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(args) => args.clone(),
        };

        let meta = match self.registry.get(name) {
            Some(descriptor) => descriptor.meta.clone(),
            None => return Err(RpcError::ToolNotFound(name.to_string())),
        };

        let result = tokio::time::timeout(self.tool_timeout, self.registry.invoke(name, args))
            .await
            .map_err(|_| {
                RpcError::internal(format!(
                    "Tool {name} timed out after {}ms",
                    self.tool_timeout.as_millis()
                ))
            })?
            .ok_or_else(|| RpcError::ToolNotFound(name.to_string()))?;

        match result {
            Ok(output) => Ok(tool_result(output.summary, output.structured, meta, false)),
            Err(err) => match err.payload() {
                Some(payload) => {
                    info!(tool = name, reason = %err, "tool rejected its input");
                    Ok(tool_result(err.to_string(), payload, meta, true))
                }
                None => Err(RpcError::internal(err.to_string())),
            },
        }
    }

    /// Handles `resources/read`.
    async fn read_resource(&self, params: Map<String, Value>) -> Result<Value, RpcError> {
        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::InvalidParams("uri is required".into()))?;

        let resource = self
            .widgets
            .find(uri)
            .ok_or_else(|| RpcError::ResourceNotFound(uri.to_string()))?;

        let text = self
            .widgets
            .read(resource)
            .await
            .map_err(|e| RpcError::Internal {
                message: format!("Failed to fetch widget: {e}"),
                data: Some(json!({ "uri": resource.uri })),
            })?;

        let mut content = json!({
            "uri": resource.uri,
            "mimeType": resource.mime_type,
            "text": text,
        });
        if let Some(description) = &resource.description {
            content["_meta"] = json!({ "openai/widgetDescription": description });
        }

        Ok(json!({ "contents": [content] }))
    }
}

fn tool_result(text: String, structured: Value, meta: Option<Value>, is_error: bool) -> Value {
    let mut result = json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
    });
    if let Some(meta) = meta {
        result["_meta"] = meta;
    }
    if is_error {
        result["isError"] = json!(true);
    }
    result
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
