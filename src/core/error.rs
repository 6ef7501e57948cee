/// Error Types for Tool and Resource Dispatch
///
/// This module defines the error taxonomy for the dispatch layer:
/// - ToolError: a failure raised inside a tool or resource handler
/// - DispatchError: everything that can go wrong between receiving a
///   tools/call or resources/read request and returning its result
///
/// Upstream fetch failures are deliberately NOT represented here: the weather
/// fetcher absorbs them and returns sentinel strings instead (see
/// core::fetch), so only handler-internal failures reach this taxonomy.

use thiserror::Error;

/// Failure raised inside a tool or resource handler.
///
/// Carries a human-readable cause (e.g. a translation provider error).
/// Handlers construct these directly; the dispatcher converts them into
/// MCP error content without crashing.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ToolError(pub String);

impl ToolError {
    /// Build a ToolError from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}

/// Errors produced by the request dispatcher.
///
/// Each variant maps to a JSON-RPC 2.0 error code via `code()`. Handler
/// failures are kept separate because the MCP protocol reports them inside
/// the tool result (`isError: true`) rather than as a JSON-RPC error.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Requested tool name is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Requested resource URI matches no registered definition or template.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Arguments failed schema validation; names the offending field.
    #[error("Invalid arguments: missing or invalid field '{field}'")]
    InvalidArguments { field: String },

    /// A handler failed while executing; carries the underlying cause.
    #[error("{0}")]
    Handler(#[from] ToolError),
}

impl DispatchError {
    /// JSON-RPC 2.0 error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            DispatchError::UnknownTool(_) | DispatchError::UnknownResource(_) => -32601,
            DispatchError::InvalidArguments { .. } => -32602,
            DispatchError::Handler(_) => -32603,
        }
    }
}
