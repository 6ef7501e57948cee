/// MCP Server Implementation
///
/// This module contains the core MCP server implementation including:
/// - JSON-RPC 2.0 request/response structures
/// - Request dispatcher (schema validation + handler invocation)
/// - HTTP server setup with Actix Web
/// - STDIO server implementation for line-based communication
/// - Request handlers for MCP protocol methods

use actix_web::{
    middleware::{Compress, DefaultHeaders, Logger},
    web, App, HttpResponse, HttpServer, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::core::error::DispatchError;
use crate::core::fetch;
use crate::core::registry::{ResourceRegistry, ToolRegistry};
use crate::core::utils::get_env_parsed;
use crate::resources;
use crate::tools;
use crate::tools::translate::TranslatorAdapter;

/// Application state shared across all worker threads in HTTP mode.
///
/// This state is cloned for each worker thread and contains server metadata
/// that is used in MCP protocol responses.
#[derive(Clone)]
pub struct AppState {
    /// Server name as reported in MCP initialize responses
    pub server_name: String,
    /// Server version string as reported in MCP initialize responses
    pub server_version: String,
}

/// JSON-RPC 2.0 request structure for MCP protocol.
///
/// All MCP requests follow the JSON-RPC 2.0 specification. The jsonrpc field
/// must be "2.0", id is optional (None for notifications), method specifies
/// the MCP method to call, and params contains method-specific parameters.
#[derive(Deserialize, Debug)]
pub struct MCPRequest {
    /// JSON-RPC version identifier, must be "2.0"
    #[allow(dead_code)]
    jsonrpc: String,
    /// Request ID for correlating responses. None indicates a notification.
    id: Option<Value>,
    /// MCP method name (e.g., "initialize", "tools/list", "tools/call")
    method: String,
    /// Method-specific parameters as JSON value
    params: Option<Value>,
}

/// JSON-RPC 2.0 response structure for MCP protocol.
///
/// Responses must include jsonrpc "2.0", the request id, and either a result
/// or an error. The error field is only present when an error occurred.
#[derive(Serialize, Debug)]
pub struct MCPResponse {
    /// JSON-RPC version identifier, always "2.0"
    jsonrpc: String,
    /// Request ID from the original request
    id: Option<Value>,
    /// Response result, present when request succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error information, present when request failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<MCPError>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Serialize, Debug)]
pub struct MCPError {
    /// JSON-RPC error code (e.g., -32601 for method not found)
    code: i32,
    /// Human-readable error message
    message: String,
    /// Optional additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl MCPResponse {
    /// Successful response carrying a result value.
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Failed response carrying a JSON-RPC error.
    fn failure(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(MCPError {
                code,
                message,
                data: None,
            }),
        }
    }

    #[cfg(test)]
    pub fn result_value(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    #[cfg(test)]
    pub fn error_code(&self) -> Option<i32> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// Dispatch a tool call: look up, validate, invoke.
///
/// 1. Unknown names fail with DispatchError::UnknownTool before any work runs.
/// 2. Raw arguments are validated and coerced against the tool's declared
///    schema; failures name the offending field.
/// 3. The handler runs with the coerced arguments. Handlers are Send + Sync
///    and hold no mutable state, so concurrent in-flight dispatches never
///    interfere.
/// 4. Handler failures are converted to DispatchError::Handler; they never
///    escape as panics.
///
/// Returns the handler's raw JSON result; the caller wraps it in the MCP
/// content envelope.
pub async fn dispatch_tool_call(
    registry: &ToolRegistry,
    name: &str,
    raw_args: &Value,
) -> std::result::Result<Value, DispatchError> {
    let (tool, handler) = registry
        .get(name)
        .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
    let coerced = tool.validate_args(raw_args)?;
    let result = handler(coerced).await?;
    Ok(result)
}

/// Handle one MCP request, shared by the HTTP and STDIO transports.
///
/// Routes the request to the appropriate method handler and returns a
/// JSON-RPC 2.0 compliant response. Unknown methods yield -32601.
pub async fn handle_request(
    state: &AppState,
    tool_registry: &ToolRegistry,
    resource_registry: &ResourceRegistry,
    method: &str,
    id: Option<Value>,
    params: Option<Value>,
) -> MCPResponse {
    match method {
        "initialize" => handle_initialize(state, id),
        "tools/list" => MCPResponse::success(
            id,
            serde_json::json!({ "tools": tool_registry.descriptors() }),
        ),
        "tools/call" => handle_tools_call(tool_registry, id, params).await,
        "resources/list" => MCPResponse::success(
            id,
            serde_json::json!({ "resources": resource_registry.static_descriptors() }),
        ),
        "resources/templates/list" => MCPResponse::success(
            id,
            serde_json::json!({ "resourceTemplates": resource_registry.template_descriptors() }),
        ),
        "resources/read" => handle_resources_read(resource_registry, id, params).await,
        _ => MCPResponse::failure(id, -32601, format!("Method not found: {method}")),
    }
}

/// Handle MCP initialize method.
///
/// The initialize method is the first method called by MCP clients to
/// establish a connection. It returns the protocol version, server
/// capabilities, and server information.
fn handle_initialize(state: &AppState, id: Option<Value>) -> MCPResponse {
    MCPResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": state.server_name,
                "version": state.server_version
            }
        }),
    )
}

/// Handle MCP tools/call method.
///
/// Extracts the tool name and arguments from params and delegates to the
/// dispatcher. Per MCP conventions, handler failures are reported inside the
/// result as error content (isError: true) while lookup and validation
/// failures become JSON-RPC errors.
async fn handle_tools_call(
    registry: &ToolRegistry,
    id: Option<Value>,
    params: Option<Value>,
) -> MCPResponse {
    let tool_params = match params {
        Some(p) => p,
        None => return MCPResponse::failure(id, -32602, "Invalid params".to_string()),
    };

    let tool_name = tool_params
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("");
    // Tool arguments default to an empty object when not provided
    let arguments = tool_params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match dispatch_tool_call(registry, tool_name, &arguments).await {
        Ok(result) => MCPResponse::success(
            id,
            serde_json::json!({
                "content": [
                    {
                        "type": "text",
                        "text": serde_json::to_string(&result).unwrap_or_default()
                    }
                ],
                "isError": false
            }),
        ),
        Err(DispatchError::Handler(e)) => {
            tracing::warn!(tool = tool_name, error = %e, "tool handler failed");
            MCPResponse::success(
                id,
                serde_json::json!({
                    "content": [
                        {
                            "type": "text",
                            "text": format!("Error: {e}")
                        }
                    ],
                    "isError": true
                }),
            )
        }
        Err(e) => MCPResponse::failure(id, e.code(), e.to_string()),
    }
}

/// Handle MCP resources/read method.
///
/// Resolves the concrete URI against registered templates, runs the matched
/// handler with the extracted placeholder values, and wraps the result in
/// the MCP resource contents envelope.
async fn handle_resources_read(
    registry: &ResourceRegistry,
    id: Option<Value>,
    params: Option<Value>,
) -> MCPResponse {
    let uri = match params.as_ref().and_then(|p| p.get("uri")).and_then(Value::as_str) {
        Some(uri) => uri,
        None => return MCPResponse::failure(id, -32602, "Invalid params".to_string()),
    };

    let (_, handler, captures) = match registry.resolve(uri) {
        Some(matched) => matched,
        None => {
            let err = DispatchError::UnknownResource(uri.to_string());
            return MCPResponse::failure(id, err.code(), err.to_string());
        }
    };

    match handler(captures).await {
        Ok(result) => MCPResponse::success(
            id,
            serde_json::json!({
                "contents": [
                    {
                        "uri": uri,
                        "mimeType": "application/json",
                        "text": serde_json::to_string(&result).unwrap_or_default()
                    }
                ]
            }),
        ),
        Err(e) => {
            tracing::warn!(uri, error = %e, "resource handler failed");
            let err = DispatchError::Handler(e);
            MCPResponse::failure(id, err.code(), err.to_string())
        }
    }
}

/// Initialize and register all tools.
///
/// This function is called during server startup to create the tool registry
/// and register all available tools. Add new tool registrations here when
/// implementing additional tools.
///
/// # Returns
/// An Arc-wrapped ToolRegistry containing all registered tools and handlers
pub fn initialize_tools() -> std::io::Result<Arc<ToolRegistry>> {
    let client = fetch::build_client().map_err(std::io::Error::other)?;
    let translator = Arc::new(TranslatorAdapter::from_env());

    let mut registry = ToolRegistry::new();
    tools::sum::register(&mut registry);
    tools::greet::register(&mut registry);
    tools::greet::register_goodbye(&mut registry);
    tools::weather::register(&mut registry, client);
    tools::translate::register(&mut registry, translator);

    Ok(Arc::new(registry))
}

/// Initialize and register all resources.
///
/// # Arguments
/// * `name` - Server name reported by the server_info resource
/// * `version` - Server version reported by the server_info resource
pub fn initialize_resources(name: &str, version: &str) -> std::io::Result<Arc<ResourceRegistry>> {
    let client = fetch::build_client().map_err(std::io::Error::other)?;

    let mut registry = ResourceRegistry::new();
    resources::server_info::register(&mut registry, name.to_string(), version.to_string());
    resources::weather::register(&mut registry, client);

    Ok(Arc::new(registry))
}

/// Health check endpoint handler.
///
/// Returns a simple JSON response indicating the server is running.
/// Used by load balancers and monitoring systems to verify server availability.
async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "mcp-weather-translate"
    })))
}

/// Metrics endpoint handler for monitoring.
///
/// Returns the total number of requests processed since server start.
async fn metrics_handler(
    counter: web::Data<std::sync::atomic::AtomicU64>,
) -> Result<HttpResponse> {
    let count = counter.load(std::sync::atomic::Ordering::Relaxed);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "requests_total": count,
        "status": "ok"
    })))
}

/// MCP JSON-RPC request handler for HTTP mode.
///
/// Increments the request counter and delegates to the shared request
/// handler. Requests on this route run concurrently; independent tool calls
/// may complete out of order relative to arrival.
async fn mcp_handler(
    state: web::Data<AppState>,
    tool_registry: web::Data<Arc<ToolRegistry>>,
    resource_registry: web::Data<Arc<ResourceRegistry>>,
    counter: web::Data<std::sync::atomic::AtomicU64>,
    req: web::Json<MCPRequest>,
) -> Result<HttpResponse> {
    // Relaxed ordering: the counter needs atomicity only
    counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

    let response = handle_request(
        &state,
        &tool_registry,
        &resource_registry,
        &req.method,
        req.id.clone(),
        req.params.clone(),
    )
    .await;

    Ok(HttpResponse::Ok().json(response))
}

/// Run the MCP server in HTTP mode.
///
/// Configures and starts an Actix Web HTTP server handling MCP protocol
/// requests over HTTP/JSON-RPC 2.0.
///
/// # Arguments
/// * `name` - Server name for MCP protocol responses
/// * `version` - Server version string
/// * `host` - Bind address (e.g., "0.0.0.0" for all interfaces)
/// * `port` - Port number to listen on
///
/// # Configuration
/// Worker threads default to the CPU count (capped at 16) and can be
/// overridden via WORKER_THREADS. Connection limits and timeouts follow the
/// same bounds as the request path: 30 second request timeout, 30 second
/// keep-alive, 10 second graceful shutdown.
pub async fn run_server_http(
    name: String,
    version: String,
    host: String,
    port: u16,
) -> std::io::Result<()> {
    use std::sync::atomic::AtomicU64;
    use std::time::Duration;

    let bind_addr = format!("{host}:{port}");

    let app_state = web::Data::new(AppState {
        server_name: name.clone(),
        server_version: version.clone(),
    });

    // Registries are built once and shared read-only across worker threads
    let tool_registry = web::Data::new(initialize_tools()?);
    let resource_registry = web::Data::new(initialize_resources(&name, &version)?);

    let request_count = web::Data::new(AtomicU64::new(0));

    // Worker count defaults to CPU count, capped to avoid excessive context
    // switching; override via WORKER_THREADS
    let workers = get_env_parsed("WORKER_THREADS", num_cpus::get().clamp(1, 16));

    tracing::info!(
        name,
        version,
        bind_addr,
        workers,
        "MCP server starting (HTTP mode)"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(tool_registry.clone())
            .app_data(resource_registry.clone())
            .app_data(request_count.clone())
            // Compress JSON responses (gzip/brotli)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY")),
            )
            // Access log: request line, status, duration
            .wrap(Logger::new("%r %s %Dms"))
            .route("/health", web::get().to(health))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/mcp", web::post().to(mcp_handler))
            .route("/", web::post().to(mcp_handler))
            .route("/", web::get().to(health))
    })
    .workers(workers)
    .max_connections(10000)
    .max_connection_rate(1000)
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_secs(30))
    .client_disconnect_timeout(Duration::from_secs(2))
    .shutdown_timeout(10)
    .bind(&bind_addr)?
    .run()
    .await
}

/// Run the MCP server in STDIO mode.
///
/// Implements MCP protocol over standard input/output for compatibility with
/// MCP Inspector and local development. The server reads JSON-RPC requests
/// line-by-line from stdin and writes responses to stdout. All logging goes
/// to stderr to avoid interfering with the JSON-RPC protocol stream.
///
/// # Arguments
/// * `name` - Server name for MCP protocol responses
/// * `version` - Server version string
pub async fn run_server_stdio(name: String, version: String) -> std::io::Result<()> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

    tracing::info!(name, version, "MCP server starting (STDIO mode)");

    let tool_registry = initialize_tools()?;
    let resource_registry = initialize_resources(&name, &version)?;
    let app_state = AppState {
        server_name: name,
        server_version: version,
    };

    // Buffered I/O; 8KB balances memory with throughput
    let stdin = tokio::io::stdin();
    let mut stdin = BufReader::with_capacity(8192, stdin).lines();
    let stdout = tokio::io::stdout();
    let mut stdout = BufWriter::with_capacity(8192, stdout);

    while let Some(line) = stdin.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request: std::result::Result<MCPRequest, _> = serde_json::from_str(&line);
        match request {
            Ok(req) => {
                // Notifications (no id) are one-way and get no response
                if req.id.is_none() {
                    continue;
                }

                let response = handle_request(
                    &app_state,
                    &tool_registry,
                    &resource_registry,
                    &req.method,
                    req.id.clone(),
                    req.params.clone(),
                )
                .await;

                let response_json = match serde_json::to_string(&response) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(error = %e, "error serializing response");
                        continue;
                    }
                };

                // One response per line, flushed immediately for low latency
                if let Err(e) = stdout.write_all(response_json.as_bytes()).await {
                    tracing::error!(error = %e, "error writing to stdout");
                    break;
                }
                if let Err(e) = stdout.write_all(b"\n").await {
                    tracing::error!(error = %e, "error writing newline");
                    break;
                }
                if let Err(e) = stdout.flush().await {
                    tracing::error!(error = %e, "error flushing stdout");
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "request parse error");
                // Best effort: extract the id and answer with a parse error
                if let Ok(partial) = serde_json::from_str::<Value>(&line) {
                    if let Some(id) = partial.get("id") {
                        let error_response = MCPResponse::failure(
                            Some(id.clone()),
                            -32700,
                            format!("Parse error: {e}"),
                        );
                        if let Ok(response_json) = serde_json::to_string(&error_response) {
                            let _ = stdout.write_all(response_json.as_bytes()).await;
                            let _ = stdout.write_all(b"\n").await;
                            let _ = stdout.flush().await;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{MCPTool, ParamType, ToolHandler, ToolParam};
    use crate::tools::weather::alerts_report;

    fn test_state() -> AppState {
        AppState {
            server_name: "test-server".to_string(),
            server_version: "0.0.0".to_string(),
        }
    }

    fn test_tools() -> Arc<ToolRegistry> {
        initialize_tools().unwrap()
    }

    fn test_resources() -> Arc<ResourceRegistry> {
        initialize_resources("test-server", "0.0.0").unwrap()
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_is_an_error() {
        let registry = test_tools();
        let err = dispatch_tool_call(&registry, "no_such_tool", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownTool(_)));
        assert_eq!(err.code(), -32601);
    }

    #[tokio::test]
    async fn dispatch_missing_argument_names_the_field() {
        let registry = test_tools();
        let err = dispatch_tool_call(&registry, "sum_numbers", &serde_json::json!({"a": 1}))
            .await
            .unwrap_err();
        match err {
            DispatchError::InvalidArguments { field } => assert_eq!(field, "b"),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sum_adds_integers_including_negatives_and_zero() {
        let registry = test_tools();
        for (a, b) in [(2i64, 10i64), (-5, 3), (0, 0), (-7, -8)] {
            let result =
                dispatch_tool_call(&registry, "sum_numbers", &serde_json::json!({"a": a, "b": b}))
                    .await
                    .unwrap();
            assert_eq!(result["sum"], a + b);
        }
    }

    #[tokio::test]
    async fn greet_interpolates_name_verbatim() {
        let registry = test_tools();
        let result = dispatch_tool_call(
            &registry,
            "greet_user",
            &serde_json::json!({"name": "Ada <Lovelace>"}),
        )
        .await
        .unwrap();
        assert_eq!(result["message"], "Hello, Ada <Lovelace>!");

        let result = dispatch_tool_call(
            &registry,
            "goodbye_user",
            &serde_json::json!({"name": "Ada"}),
        )
        .await
        .unwrap();
        assert_eq!(result["message"], "Goodbye, Ada!");
    }

    /// Registry whose alerts tool serves canned per-state payloads, standing
    /// in for the remote fetcher.
    fn mock_alerts_registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        let tool = MCPTool {
            name: "get_weather_alerts",
            description: "Get active weather alerts for a US state.",
            params: vec![ToolParam::required(
                "state",
                ParamType::String,
                "Two-letter US state code",
            )],
        };
        let handler: ToolHandler = Box::new(|args| {
            Box::pin(async move {
                let state = args["state"].as_str().unwrap_or_default().to_string();
                // Simulate the upstream round-trip suspending the task
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                let payload = serde_json::json!({
                    "features": [
                        {"properties": {"event": format!("Alert for {state}")}}
                    ]
                });
                Ok(serde_json::json!({ "alerts": alerts_report(Some(payload)) }))
            })
        });
        registry.register(tool, handler);
        Arc::new(registry)
    }

    #[tokio::test]
    async fn concurrent_alert_dispatches_stay_independent() {
        let registry = mock_alerts_registry();
        let states = ["CA", "NY", "TX", "WA", "FL", "OR", "CO", "NV"];

        let calls = states.iter().map(|state| {
            let registry = registry.clone();
            async move {
                let result = dispatch_tool_call(
                    &registry,
                    "get_weather_alerts",
                    &serde_json::json!({"state": state}),
                )
                .await
                .unwrap();
                (state, result)
            }
        });
        let results = futures_util::future::join_all(calls).await;

        assert_eq!(results.len(), states.len());
        for (state, result) in results {
            let report = result["alerts"].as_str().unwrap();
            assert!(report.contains(&format!("Alert for {state}")));
        }
    }

    #[tokio::test]
    async fn unknown_method_yields_method_not_found() {
        let response = handle_request(
            &test_state(),
            &test_tools(),
            &test_resources(),
            "prompts/list",
            Some(serde_json::json!(1)),
            None,
        )
        .await;
        assert_eq!(response.error_code(), Some(-32601));
    }

    #[tokio::test]
    async fn tools_list_includes_all_registered_tools() {
        let response = handle_request(
            &test_state(),
            &test_tools(),
            &test_resources(),
            "tools/list",
            Some(serde_json::json!(1)),
            None,
        )
        .await;
        let tools = response.result_value().unwrap()["tools"].as_array().unwrap();
        let names: Vec<&str> = tools
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "sum_numbers",
                "greet_user",
                "goodbye_user",
                "get_weather_alerts",
                "translate_text"
            ]
        );
    }

    #[tokio::test]
    async fn tools_call_wraps_result_in_content_envelope() {
        let response = handle_request(
            &test_state(),
            &test_tools(),
            &test_resources(),
            "tools/call",
            Some(serde_json::json!(7)),
            Some(serde_json::json!({"name": "sum_numbers", "arguments": {"a": 5, "b": 7}})),
        )
        .await;
        let result = response.result_value().unwrap();
        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("12"));
    }

    #[tokio::test]
    async fn handler_failure_is_reported_as_error_content() {
        let mut registry = ToolRegistry::new();
        registry.register(
            MCPTool {
                name: "always_fails",
                description: "Fails on every call.",
                params: vec![],
            },
            Box::new(|_args| {
                Box::pin(async { Err(crate::core::error::ToolError::new("provider down")) })
            }),
        );

        let response = handle_tools_call(
            &registry,
            Some(serde_json::json!(9)),
            Some(serde_json::json!({"name": "always_fails", "arguments": {}})),
        )
        .await;
        let result = response.result_value().unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("provider down"));
    }

    #[tokio::test]
    async fn invalid_arguments_surface_as_json_rpc_error() {
        let response = handle_request(
            &test_state(),
            &test_tools(),
            &test_resources(),
            "tools/call",
            Some(serde_json::json!(8)),
            Some(serde_json::json!({"name": "greet_user", "arguments": {}})),
        )
        .await;
        assert_eq!(response.error_code(), Some(-32602));
    }

    #[tokio::test]
    async fn resources_read_serves_static_server_info() {
        let response = handle_request(
            &test_state(),
            &test_tools(),
            &test_resources(),
            "resources/read",
            Some(serde_json::json!(2)),
            Some(serde_json::json!({"uri": "resource://server_info"})),
        )
        .await;
        let contents = &response.result_value().unwrap()["contents"][0];
        assert_eq!(contents["uri"], "resource://server_info");
        assert!(contents["text"].as_str().unwrap().contains("test-server"));
    }

    #[tokio::test]
    async fn resources_read_unknown_uri_is_an_error() {
        let response = handle_request(
            &test_state(),
            &test_tools(),
            &test_resources(),
            "resources/read",
            Some(serde_json::json!(3)),
            Some(serde_json::json!({"uri": "resource://nope"})),
        )
        .await;
        assert_eq!(response.error_code(), Some(-32601));
    }

    #[actix_web::test]
    async fn http_surface_round_trips_json_rpc() {
        use actix_web::{test, web, App};
        use std::sync::atomic::AtomicU64;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .app_data(web::Data::new(test_tools()))
                .app_data(web::Data::new(test_resources()))
                .app_data(web::Data::new(AtomicU64::new(0)))
                .route("/mcp", web::post().to(mcp_handler)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(body["result"]["serverInfo"]["name"], "test-server");

        let req = test::TestRequest::post()
            .uri("/mcp")
            .set_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "greet_user", "arguments": {"name": "Grace"}}
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let text = body["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Hello, Grace!"));
    }
}
