//! MCP Protocol Models and Constants
//!
//! This module contains all data structures and constants related to the
//! Model Context Protocol (MCP) wire format.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::RpcError;

// =============================================================================
// MCP Constants
// =============================================================================

/// JSON-RPC version accepted by the dispatcher
pub const JSONRPC_VERSION: &str = "2.0";
/// MIME type for skybridge widgets
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Prefix shared by one-way notifications
pub const NOTIFICATION_PREFIX: &str = "notifications/";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Methods understood by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcMethod {
    Initialize,
    Initialized,
    Ping,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    /// Any other `notifications/*` message.
    Notification(String),
    Unknown(String),
}

impl RpcMethod {
    pub fn parse(name: &str) -> Self {
        match name {
            "initialize" => RpcMethod::Initialize,
            "notifications/initialized" => RpcMethod::Initialized,
            "ping" => RpcMethod::Ping,
            "tools/list" => RpcMethod::ToolsList,
            "tools/call" => RpcMethod::ToolsCall,
            "resources/list" => RpcMethod::ResourcesList,
            "resources/read" => RpcMethod::ResourcesRead,
            other if other.starts_with(NOTIFICATION_PREFIX) => {
                RpcMethod::Notification(other.to_string())
            }
            other => RpcMethod::Unknown(other.to_string()),
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, RpcMethod::Initialized | RpcMethod::Notification(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RpcMethod::Initialize => "initialize",
            RpcMethod::Initialized => "notifications/initialized",
            RpcMethod::Ping => "ping",
            RpcMethod::ToolsList => "tools/list",
            RpcMethod::ToolsCall => "tools/call",
            RpcMethod::ResourcesList => "resources/list",
            RpcMethod::ResourcesRead => "resources/read",
            RpcMethod::Notification(name) | RpcMethod::Unknown(name) => name,
        }
    }
}

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Clone)]
pub struct JsonRpcRequest {
    /// Request identifier; `None` when the field is absent, `Some(Null)` when
    /// it was sent as `null`.
    pub id: Option<Value>,

    /// Method to invoke
    pub method: RpcMethod,

    /// Parameters for the method
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Validates a parsed body as a JSON-RPC 2.0 request.
    ///
    /// On failure the id recovered from the body (if any) is returned with the
    /// error so the reply can still echo it.
    pub fn from_value(body: Value) -> Result<Self, (Option<Value>, RpcError)> {
        let mut object = match body {
            Value::Object(object) => object,
            _ => {
                return Err((
                    None,
                    RpcError::InvalidRequest("expected a JSON object".into()),
                ))
            }
        };

        let id = object.remove("id");

        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err((
                id,
                RpcError::InvalidRequest("jsonrpc must be \"2.0\"".into()),
            ));
        }

        // A non-string method cannot name anything we serve.
        let method = match object.get("method") {
            Some(Value::String(name)) => RpcMethod::parse(name),
            Some(other) => RpcMethod::Unknown(other.to_string()),
            None => {
                return Err((id, RpcError::InvalidRequest("method is required".into())));
            }
        };

        Ok(Self {
            id,
            method,
            params: object.remove("params"),
        })
    }

    /// Returns `params` as a mapping, treating absent params as empty.
    pub fn params_object(&self) -> Result<Map<String, Value>, RpcError> {
        match &self.params {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(RpcError::Internal {
                message: "Internal error".into(),
                data: Some(Value::String(format!(
                    "params must be an object, got {}",
                    json_type_name(other)
                ))),
            }),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Server identity advertised by `initialize` and the info endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Behaviour hints the host may use when presenting a tool.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotent_hint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_world_hint: Option<bool>,
}

impl ToolAnnotations {
    /// Hints for a tool that only reads data.
    pub fn read_only() -> Self {
        Self {
            read_only_hint: Some(true),
            idempotent_hint: Some(true),
            destructive_hint: Some(false),
            open_world_hint: Some(false),
        }
    }

    /// Hints for a tool that produces a fresh draft on every call.
    pub fn generative() -> Self {
        Self {
            read_only_hint: Some(false),
            idempotent_hint: Some(false),
            destructive_hint: Some(false),
            open_world_hint: Some(false),
        }
    }
}

/// Entry returned by `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    #[serde(rename = "inputSchema")]
    pub input_schema: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,

    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}
