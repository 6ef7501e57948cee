/// Server Info Resource Implementation
///
/// A static resource exposing the server's name and version as JSON. Mostly
/// useful as a liveness probe for the resource surface and as the simplest
/// example of a static (non-templated) resource.

use crate::core::registry::{MCPResource, ResourceHandler, ResourceRegistry};

/// Register the server_info resource with the resource registry.
///
/// # Arguments
/// * `registry` - Mutable reference to the resource registry
/// * `server_name` - Name reported by the resource
/// * `server_version` - Version string reported by the resource
pub fn register(registry: &mut ResourceRegistry, server_name: String, server_version: String) {
    let resource = MCPResource {
        uri: "resource://server_info",
        name: "server_info",
        description: "Server name and version.",
    };

    let handler: ResourceHandler = Box::new(move |_captures| {
        let name = server_name.clone();
        let version = server_version.clone();
        Box::pin(async move {
            Ok(serde_json::json!({
                "name": name,
                "version": version,
            }))
        })
    });

    registry.register(resource, handler);
}
