//! Widget Apps Library
//!
//! MCP (Model Context Protocol) server for the example chat widgets: one
//! JSON-RPC dispatcher, a handful of interchangeable tool sets, and the
//! widget HTML each of them renders into.

// Domain modules
pub mod apps;
pub mod mcp;
pub mod tools;
pub mod widget;

// Infrastructure
pub mod config;
pub mod router;
pub mod state;
