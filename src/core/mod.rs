/// Core Server Framework Module
///
/// This module contains the core server implementation including:
/// - server.rs: MCP server with HTTP and STDIO transports plus the dispatcher
/// - registry.rs: tool and resource registries with typed input schemas
/// - error.rs: dispatch and handler error taxonomy
/// - fetch.rs: upstream JSON fetcher with value-based failure handling
/// - utils.rs: configuration and environment helpers

pub mod error;
pub mod fetch;
pub mod registry;
pub mod server;
pub mod utils;
