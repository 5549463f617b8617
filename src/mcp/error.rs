//! JSON-RPC error taxonomy for the protocol dispatcher.

use serde_json::Value;

use super::helpers::rpc_error;

/// Standard JSON-RPC 2.0 error codes.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Every protocol-level failure the dispatcher can report.
///
/// Tool handlers report business failures through [`crate::tools::ToolError`]
/// instead; only the ones that cannot be rendered as a payload end up here.
#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    #[error("Parse error")]
    Parse,

    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Method not found")]
    MethodNotFound(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("{message}")]
    Internal {
        message: String,
        data: Option<Value>,
    },
}

impl RpcError {
    pub fn internal(message: impl Into<String>) -> Self {
        RpcError::Internal {
            message: message.into(),
            data: None,
        }
    }

    pub fn code(&self) -> i32 {
        use codes::*;
        match self {
            RpcError::Parse => PARSE_ERROR,
            RpcError::InvalidRequest(_) => INVALID_REQUEST,
            RpcError::MethodNotFound(_) | RpcError::ToolNotFound(_) => METHOD_NOT_FOUND,
            RpcError::InvalidParams(_) | RpcError::ResourceNotFound(_) => INVALID_PARAMS,
            RpcError::Internal { .. } => INTERNAL_ERROR,
        }
    }

    fn data(&self) -> Option<Value> {
        match self {
            RpcError::MethodNotFound(method) => Some(Value::String(method.clone())),
            RpcError::Internal { data, .. } => data.clone(),
            _ => None,
        }
    }

    /// Renders the error as a full JSON-RPC envelope for the given request id.
    pub fn to_envelope(&self, id: Option<Value>) -> Value {
        rpc_error(id, self.code(), self.to_string(), self.data())
    }
}
