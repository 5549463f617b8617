//! Tool handlers exposed through `tools/call`
//!
//! Each example app contributes a handful of tools. A handler validates its own
//! arguments and answers with a [`ToolResult`]:
//! - `Ok(ToolOutput)` – structured data plus a narrated summary.
//! - `Err(ToolError::Rejected)` – a business-level failure the host renders as
//!   a payload (`{error: true, message, code?}`), not a protocol error.
//! - `Err(ToolError::Failed)` – the handler could not run at all.

pub mod email;
pub mod greeting;
pub mod image;
pub mod linkedin;
pub mod places;
pub mod registry;
pub mod testimonials;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::mcp::models::ToolDescriptor;

pub use registry::{RegistryError, ToolRegistry, ToolRegistryBuilder};

/// Successful tool outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// Human-readable narration placed in `content[0].text`.
    pub summary: String,
    /// Raw result placed verbatim in `structuredContent`.
    pub structured: Value,
}

impl ToolOutput {
    pub fn new(summary: impl Into<String>, structured: Value) -> Self {
        Self {
            summary: summary.into(),
            structured,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Input was understood but refused; reported inside the result payload.
    #[error("{message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },

    /// The handler itself failed; reported as an internal JSON-RPC error.
    #[error("tool execution failed: {0}")]
    Failed(String),
}

impl ToolError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ToolError::Rejected {
            message: message.into(),
            code: None,
        }
    }

    pub fn rejected_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        ToolError::Rejected {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Payload-level error shape, or `None` for failures that are not
    /// representable as a payload.
    pub fn payload(&self) -> Option<Value> {
        match self {
            ToolError::Rejected { message, code } => {
                let mut payload = json!({ "error": true, "message": message });
                if let Some(code) = code {
                    payload["code"] = json!(code);
                }
                Some(payload)
            }
            ToolError::Failed(_) => None,
        }
    }
}

pub type ToolResult = Result<ToolOutput, ToolError>;

/// A named, schema-described callable exposed to the host.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    async fn call(&self, args: Value) -> ToolResult;
}

/// Deserializes tool arguments, turning shape errors into a rejection.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| {
        ToolError::rejected_with_code(format!("Invalid arguments: {e}"), "INVALID_ARGUMENTS")
    })
}
