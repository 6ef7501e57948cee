/// Weather Alerts Resource Implementation
///
/// Exposes the same active-alerts report as the get_weather_alerts tool, but
/// addressed as a templated resource: `weather://{state}/alerts`. The state
/// placeholder is extracted by the resource registry and passed through to
/// the shared report logic verbatim.

use crate::core::error::ToolError;
use crate::core::registry::{MCPResource, ResourceHandler, ResourceRegistry};
use crate::tools::weather::active_alerts;

/// Register the per-state weather alerts resource with the resource registry.
///
/// # Arguments
/// * `registry` - Mutable reference to the resource registry
/// * `client` - Shared HTTP client used for NWS requests
pub fn register(registry: &mut ResourceRegistry, client: reqwest::Client) {
    let resource = MCPResource {
        uri: "weather://{state}/alerts",
        name: "weather_alerts",
        description: "Active weather alerts for a US state.",
    };

    let handler: ResourceHandler = Box::new(move |captures| {
        let client = client.clone();
        Box::pin(async move {
            let state = captures
                .into_iter()
                .next()
                .ok_or_else(|| ToolError::new("missing 'state' segment"))?;
            let report = active_alerts(&client, &state).await;
            Ok(serde_json::json!({ "alerts": report }))
        })
    });

    registry.register(resource, handler);
}
