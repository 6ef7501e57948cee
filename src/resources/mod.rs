/// Resources Module
///
/// This module contains all MCP resource implementations. Like tools, each
/// resource exports a `register` function called during server
/// initialization; unlike tools, resources are read-only and addressed by
/// URI rather than invoked by name.

pub mod server_info;
pub mod weather;
