/// Tool and Resource Registries
///
/// This module holds the dispatch tables for the server:
/// - ToolRegistry: maps tool name -> (typed input schema, async handler)
/// - ResourceRegistry: maps URI template -> async handler, with placeholder
///   extraction for templated resources
///
/// Both registries are populated exactly once during server initialization
/// and frozen behind an Arc afterwards; lookups never require locking.

use std::collections::HashMap;

use futures_util::future::BoxFuture;
use serde_json::{Map, Value};

use crate::core::error::{DispatchError, ToolError};

/// Primitive types a tool parameter may declare.
///
/// The set is intentionally small: every tool in this server takes strings
/// and integers only. The JSON Schema emitted by tools/list is derived from
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    /// JSON Schema type name for this parameter type.
    fn json_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
        }
    }
}

/// One declared parameter of a tool's input contract.
#[derive(Debug, Clone)]
pub struct ToolParam {
    /// Field name as it appears in the arguments object
    pub name: &'static str,
    /// Human-readable description shown in the published schema
    pub description: &'static str,
    /// Declared primitive type
    pub ty: ParamType,
    /// Whether the field must be present in every call
    pub required: bool,
}

impl ToolParam {
    /// Declare a required parameter.
    pub fn required(name: &'static str, ty: ParamType, description: &'static str) -> Self {
        Self {
            name,
            description,
            ty,
            required: true,
        }
    }
}

/// MCP tool definition structure.
///
/// Each tool has a unique name, description, and an ordered list of typed
/// parameters. The JSON Schema published by tools/list and the argument
/// validation applied by tools/call are both derived from the same parameter
/// list, so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct MCPTool {
    /// Unique tool identifier (e.g., "sum_numbers", "get_weather_alerts")
    pub name: &'static str,
    /// Human-readable description of what the tool does
    pub description: &'static str,
    /// Ordered input parameter declarations
    pub params: Vec<ToolParam>,
}

impl MCPTool {
    /// JSON Schema for this tool's input, in MCP `inputSchema` form.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(
                param.name.to_string(),
                serde_json::json!({
                    "type": param.ty.json_type(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Tool descriptor as published by the tools/list method.
    ///
    /// inputSchema must be in camelCase per the MCP specification.
    pub fn descriptor(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    /// Validate and coerce raw call arguments against the declared schema.
    ///
    /// Every required field must be present and every value coercible to its
    /// declared type. Integers accept JSON integers and integer-formatted
    /// strings (callers over loose transports often quote numbers); strings
    /// must be JSON strings. Undeclared fields are dropped. On failure the
    /// returned error names the offending field.
    pub fn validate_args(&self, raw_args: &Value) -> Result<Value, DispatchError> {
        let mut coerced = Map::new();
        for param in &self.params {
            let value = raw_args.get(param.name);
            let value = match value {
                Some(v) if !v.is_null() => v,
                _ if param.required => {
                    return Err(DispatchError::InvalidArguments {
                        field: param.name.to_string(),
                    });
                }
                _ => continue,
            };
            let coerced_value = match param.ty {
                ParamType::String => value.as_str().map(|s| Value::String(s.to_string())),
                ParamType::Integer => value
                    .as_i64()
                    .or_else(|| value.as_str().and_then(|s| s.parse::<i64>().ok()))
                    .map(Value::from),
            };
            match coerced_value {
                Some(v) => {
                    coerced.insert(param.name.to_string(), v);
                }
                None => {
                    return Err(DispatchError::InvalidArguments {
                        field: param.name.to_string(),
                    });
                }
            }
        }
        Ok(Value::Object(coerced))
    }
}

/// Boxed future returned by tool and resource handlers.
pub type HandlerFuture = BoxFuture<'static, Result<Value, ToolError>>;

/// Tool handler function type definition.
///
/// Tool handlers are boxed closures that take the coerced JSON arguments and
/// return a future resolving to either a JSON result or a ToolError. The
/// handler must be Send + Sync so concurrent requests can invoke it from any
/// worker thread; handlers hold no mutable state.
pub type ToolHandler = Box<dyn Fn(Value) -> HandlerFuture + Send + Sync>;

/// Registry of available MCP tools.
///
/// The registry maintains a list of tool definitions for discovery and a
/// HashMap of tool names to their handler functions for execution.
pub struct ToolRegistry {
    /// List of all registered tools (for the tools/list method)
    tools: Vec<MCPTool>,
    /// Map of tool names to their handler functions (for tools/call)
    handlers: HashMap<&'static str, ToolHandler>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Register a tool with the registry.
    ///
    /// Called once per tool during server initialization, before the server
    /// accepts requests. Tool names are unique; registering a duplicate name
    /// replaces the handler and is a startup bug, so it logs an error.
    ///
    /// # Arguments
    /// * `tool` - Tool definition with name, description, and typed params
    /// * `handler` - Async function that executes the tool when called
    pub fn register(&mut self, tool: MCPTool, handler: ToolHandler) {
        if self.handlers.insert(tool.name, handler).is_some() {
            tracing::error!(tool = tool.name, "duplicate tool registration");
            self.tools.retain(|t| t.name != tool.name);
        }
        self.tools.push(tool);
    }

    /// Look up a tool definition and its handler by exact name.
    pub fn get(&self, name: &str) -> Option<(&MCPTool, &ToolHandler)> {
        let tool = self.tools.iter().find(|t| t.name == name)?;
        let handler = self.handlers.get(name)?;
        Some((tool, handler))
    }

    /// Descriptors of all registered tools, in registration order.
    pub fn descriptors(&self) -> Vec<Value> {
        self.tools.iter().map(MCPTool::descriptor).collect()
    }
}

/// MCP resource definition structure.
///
/// The uri field is a template: segments of the form `{name}` match any
/// concrete segment and capture its value. A template with no placeholders
/// is a static resource.
#[derive(Debug, Clone)]
pub struct MCPResource {
    /// URI template, unique across the registry
    pub uri: &'static str,
    /// Short human-readable resource name
    pub name: &'static str,
    /// Description shown in resource listings
    pub description: &'static str,
}

impl MCPResource {
    /// Whether this resource's URI contains placeholder segments.
    pub fn is_template(&self) -> bool {
        self.uri.split('/').any(is_placeholder)
    }

    /// Descriptor for resources/list (static) entries.
    pub fn descriptor(&self) -> Value {
        serde_json::json!({
            "uri": self.uri,
            "name": self.name,
            "description": self.description,
            "mimeType": "application/json",
        })
    }

    /// Descriptor for resources/templates/list entries.
    pub fn template_descriptor(&self) -> Value {
        serde_json::json!({
            "uriTemplate": self.uri,
            "name": self.name,
            "description": self.description,
            "mimeType": "application/json",
        })
    }
}

/// Resource handler function type definition.
///
/// Receives the placeholder values extracted from the concrete URI, in
/// template order (empty for static resources).
pub type ResourceHandler = Box<dyn Fn(Vec<String>) -> HandlerFuture + Send + Sync>;

/// Registry of available MCP resources.
///
/// Stores definitions in registration order and resolves concrete URIs
/// against templates segment-by-segment.
pub struct ResourceRegistry {
    resources: Vec<MCPResource>,
    handlers: HashMap<&'static str, ResourceHandler>,
}

impl ResourceRegistry {
    /// Create a new empty resource registry.
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Register a resource with the registry.
    ///
    /// Called once per resource during server initialization. URI templates
    /// are unique; a duplicate replaces the previous entry and logs an error.
    pub fn register(&mut self, resource: MCPResource, handler: ResourceHandler) {
        if self.handlers.insert(resource.uri, handler).is_some() {
            tracing::error!(uri = resource.uri, "duplicate resource registration");
            self.resources.retain(|r| r.uri != resource.uri);
        }
        self.resources.push(resource);
    }

    /// Resolve a concrete URI to a registered resource.
    ///
    /// Static URIs match exactly; templated URIs match segment-by-segment
    /// with placeholders capturing their segment values in template order.
    pub fn resolve(&self, uri: &str) -> Option<(&MCPResource, &ResourceHandler, Vec<String>)> {
        for resource in &self.resources {
            if let Some(captures) = match_template(resource.uri, uri) {
                let handler = self.handlers.get(resource.uri)?;
                return Some((resource, handler, captures));
            }
        }
        None
    }

    /// Descriptors of all static resources, in registration order.
    pub fn static_descriptors(&self) -> Vec<Value> {
        self.resources
            .iter()
            .filter(|r| !r.is_template())
            .map(MCPResource::descriptor)
            .collect()
    }

    /// Descriptors of all templated resources, in registration order.
    pub fn template_descriptors(&self) -> Vec<Value> {
        self.resources
            .iter()
            .filter(|r| r.is_template())
            .map(MCPResource::template_descriptor)
            .collect()
    }
}

/// Whether a template segment is a `{placeholder}`.
fn is_placeholder(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// Match a concrete URI against a template, capturing placeholder values.
///
/// Both strings are compared segment-by-segment on '/'. A placeholder segment
/// matches any non-empty concrete segment and captures it; any other segment
/// must match exactly. Returns the captures in template order, or None if the
/// URI does not match.
fn match_template(template: &str, uri: &str) -> Option<Vec<String>> {
    let template_segments: Vec<&str> = template.split('/').collect();
    let uri_segments: Vec<&str> = uri.split('/').collect();
    if template_segments.len() != uri_segments.len() {
        return None;
    }
    let mut captures = Vec::new();
    for (pattern, concrete) in template_segments.iter().zip(&uri_segments) {
        if is_placeholder(pattern) {
            if concrete.is_empty() {
                return None;
            }
            captures.push((*concrete).to_string());
        } else if pattern != concrete {
            return None;
        }
    }
    Some(captures)
}
