/// Sum Tool Implementation
///
/// Adds two integers and returns the result. The simplest tool in the
/// registry; useful as a smoke test for the dispatch and schema layer.

use serde_json::Value;

use crate::core::error::ToolError;
use crate::core::registry::{MCPTool, ParamType, ToolHandler, ToolParam, ToolRegistry};

/// Register the sum_numbers tool with the tool registry.
///
/// # Arguments
/// * `registry` - Mutable reference to the tool registry where the tool will be registered
pub fn register(registry: &mut ToolRegistry) {
    let tool = MCPTool {
        name: "sum_numbers",
        description: "Return the sum of two numbers.",
        params: vec![
            ToolParam::required("a", ParamType::Integer, "First addend"),
            ToolParam::required("b", ParamType::Integer, "Second addend"),
        ],
    };

    // Arguments arrive already validated and coerced by the dispatcher, so
    // both fields are guaranteed to be i64 here.
    let handler: ToolHandler = Box::new(|args: Value| {
        Box::pin(async move {
            let a = args
                .get("a")
                .and_then(Value::as_i64)
                .ok_or_else(|| ToolError::new("missing coerced field 'a'"))?;
            let b = args
                .get("b")
                .and_then(Value::as_i64)
                .ok_or_else(|| ToolError::new("missing coerced field 'b'"))?;
            Ok(serde_json::json!({ "sum": a + b }))
        })
    });

    registry.register(tool, handler);
}
