//! Model Context Protocol (MCP) Module
//!
//! This module contains the shared MCP protocol implementation, including:
//! - Protocol models (JsonRpcRequest, RpcMethod, ToolDescriptor, constants)
//! - RPC helpers (success/error envelopes, widget metadata)
//! - The error taxonomy and resource-URI normalization
//! - The dispatcher and its HTTP handlers

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod uri;

// Re-export commonly used types and functions
pub use dispatcher::{DispatchReply, Dispatcher};
pub use error::RpcError;
pub use handlers::routes;
