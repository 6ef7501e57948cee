/// MCP Server Entry Point
///
/// This is the main entry point for the MCP server. It parses environment
/// variables to determine the transport mode (STDIO or HTTP) and server
/// configuration, then starts the appropriate server implementation.
///
/// Environment Variables:
/// - SERVER_NAME: Name of the server (default: "mcp-weather-translate")
/// - SERVER_VERSION: Version string (default: "0.1.0")
/// - MCP_TRANSPORT_MODE: "stdio", "http", or "both" (default: "both")
/// - HOST: Bind address for HTTP mode (default: "0.0.0.0")
/// - PORT: Port number for HTTP mode (default: 3000)
/// - WORKER_THREADS: HTTP worker count (default: CPU count, capped at 16)
/// - TRANSLATOR_POOL_SIZE: Max concurrent translations (default: 4)
/// - TRANSLATE_TIMEOUT_SECS: Per-translation bound, 0 disables (default: 0)
/// - RUST_LOG: tracing filter (default: "info")

mod core;
mod resources;
mod tools;

use crate::core::server;
use crate::core::utils::{get_env_parsed, get_env_var};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Logs go to stderr so STDIO mode's stdout stays pure JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let name = get_env_var("SERVER_NAME", "mcp-weather-translate");
    let version = get_env_var("SERVER_VERSION", env!("CARGO_PKG_VERSION"));

    // Default to "both" so MCP Inspector can use STDIO while HTTP is up
    let transport = get_env_var("MCP_TRANSPORT_MODE", "both");

    match transport.as_str() {
        "stdio" => server::run_server_stdio(name, version).await,
        "http" => {
            let host = get_env_var("HOST", "0.0.0.0");
            let port = get_env_parsed("PORT", 3000u16);
            server::run_server_http(name, version, host, port).await
        }
        "both" => {
            let host = get_env_var("HOST", "0.0.0.0");
            let port = get_env_parsed("PORT", 3000u16);

            let name_clone = name.clone();
            let version_clone = version.clone();

            // STDIO runs in the background; HTTP owns the foreground
            let stdio_handle = tokio::spawn(async move {
                if let Err(e) = server::run_server_stdio(name_clone, version_clone).await {
                    tracing::error!(error = %e, "STDIO server error");
                }
            });

            let http_result = server::run_server_http(name, version, host, port).await;

            stdio_handle.abort();

            http_result
        }
        _ => {
            tracing::error!(
                transport,
                "invalid transport mode; must be 'stdio', 'http', or 'both'"
            );
            std::process::exit(1);
        }
    }
}
