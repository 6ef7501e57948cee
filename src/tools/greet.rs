/// Greeting Tool Implementations
///
/// Two string-templating tools: greet_user and goodbye_user. Each takes a
/// name and interpolates it verbatim into a fixed message template — no
/// sanitization or trimming is applied.

use serde_json::Value;

use crate::core::error::ToolError;
use crate::core::registry::{MCPTool, ParamType, ToolHandler, ToolParam, ToolRegistry};

/// Extract the coerced "name" argument.
fn name_arg(args: &Value) -> Result<&str, ToolError> {
    args.get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::new("missing coerced field 'name'"))
}

/// Register the greet_user tool with the tool registry.
pub fn register(registry: &mut ToolRegistry) {
    let tool = MCPTool {
        name: "greet_user",
        description: "Return a greeting message.",
        params: vec![ToolParam::required(
            "name",
            ParamType::String,
            "Name of the person to greet",
        )],
    };

    let handler: ToolHandler = Box::new(|args: Value| {
        Box::pin(async move {
            let name = name_arg(&args)?;
            Ok(serde_json::json!({ "message": format!("Hello, {name}!") }))
        })
    });

    registry.register(tool, handler);
}

/// Register the goodbye_user tool with the tool registry.
pub fn register_goodbye(registry: &mut ToolRegistry) {
    let tool = MCPTool {
        name: "goodbye_user",
        description: "Return a farewell message.",
        params: vec![ToolParam::required(
            "name",
            ParamType::String,
            "Name of the person to bid farewell",
        )],
    };

    let handler: ToolHandler = Box::new(|args: Value| {
        Box::pin(async move {
            let name = name_arg(&args)?;
            Ok(serde_json::json!({ "message": format!("Goodbye, {name}!") }))
        })
    });

    registry.register(tool, handler);
}
