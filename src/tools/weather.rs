/// Weather Alerts Tool Implementation
///
/// Fetches active alerts for a US state from the National Weather Service
/// and renders them as a human-readable report. Upstream failures never
/// surface as errors here: the fetcher returns None and the report falls
/// back to a sentinel message, so the tool is total.

use serde_json::Value;

use crate::core::error::ToolError;
use crate::core::fetch::fetch_json;
use crate::core::registry::{MCPTool, ParamType, ToolHandler, ToolParam, ToolRegistry};

/// National Weather Service API base URL.
const NWS_API_BASE: &str = "https://api.weather.gov";

/// Separator placed between formatted alerts in a report.
const ALERT_SEPARATOR: &str = "\n---\n";

/// Shown when the fetch failed or the payload had no "features" key.
const NO_DATA_MESSAGE: &str = "Unable to fetch alerts or no alerts found.";

/// Shown when the upstream "features" array is empty.
const NO_ALERTS_MESSAGE: &str = "No active alerts for this state.";

/// Format one alert feature as a fixed multi-line text block.
///
/// Pure and total: every field is read from the feature's "properties"
/// object and replaced with the literal "Unknown" when absent, so malformed
/// upstream records never fail formatting.
pub fn format_alert(feature: &Value) -> String {
    fn field<'a>(feature: &'a Value, key: &str) -> &'a str {
        feature
            .get("properties")
            .and_then(|props| props.get(key))
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }
    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
        field(feature, "event"),
        field(feature, "areaDesc"),
        field(feature, "severity"),
        field(feature, "description"),
        field(feature, "instruction"),
    )
}

/// Render a fetched alerts payload as a report string.
///
/// Branches on the fetch result tag rather than catching errors:
/// - None, or a payload without a "features" key -> NO_DATA_MESSAGE
/// - empty "features" array -> NO_ALERTS_MESSAGE
/// - otherwise each feature is formatted and joined with ALERT_SEPARATOR
pub fn alerts_report(data: Option<Value>) -> String {
    let features = match data.as_ref().and_then(|d| d.get("features")) {
        Some(f) => f,
        None => return NO_DATA_MESSAGE.to_string(),
    };
    let features = match features.as_array() {
        Some(list) => list,
        None => return NO_DATA_MESSAGE.to_string(),
    };
    if features.is_empty() {
        return NO_ALERTS_MESSAGE.to_string();
    }
    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(ALERT_SEPARATOR)
}

/// Fetch and render the active alerts report for a state.
///
/// The state code is interpolated into the URL verbatim, matching the
/// upstream API's path form; no validation or escaping is applied.
pub async fn active_alerts(client: &reqwest::Client, state: &str) -> String {
    let url = format!("{NWS_API_BASE}/alerts/active/area/{state}");
    alerts_report(fetch_json(client, &url).await)
}

/// Register the get_weather_alerts tool with the tool registry.
///
/// # Arguments
/// * `registry` - Mutable reference to the tool registry where the tool will be registered
/// * `client` - Shared HTTP client used for NWS requests
pub fn register(registry: &mut ToolRegistry, client: reqwest::Client) {
    let tool = MCPTool {
        name: "get_weather_alerts",
        description: "Get active weather alerts for a US state.",
        params: vec![ToolParam::required(
            "state",
            ParamType::String,
            "Two-letter US state code (e.g. CA, NY)",
        )],
    };

    let handler: ToolHandler = Box::new(move |args: Value| {
        let client = client.clone();
        Box::pin(async move {
            let state = args
                .get("state")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::new("missing coerced field 'state'"))?
                .to_string();
            let report = active_alerts(&client, &state).await;
            Ok(serde_json::json!({ "alerts": report }))
        })
    });

    registry.register(tool, handler);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_yields_no_data_message() {
        assert_eq!(alerts_report(None), NO_DATA_MESSAGE);
    }

    #[test]
    fn payload_without_features_yields_no_data_message() {
        let payload = serde_json::json!({"title": "alerts", "type": "FeatureCollection"});
        assert_eq!(alerts_report(Some(payload)), NO_DATA_MESSAGE);
    }

    #[test]
    fn empty_features_yields_no_alerts_message() {
        let payload = serde_json::json!({"features": []});
        assert_eq!(alerts_report(Some(payload)), NO_ALERTS_MESSAGE);
    }

    #[test]
    fn full_record_formats_every_field() {
        let feature = serde_json::json!({
            "properties": {
                "event": "Flood Warning",
                "areaDesc": "Sacramento County",
                "severity": "Severe",
                "description": "Heavy rainfall expected.",
                "instruction": "Move to higher ground.",
            }
        });
        assert_eq!(
            format_alert(&feature),
            "Event: Flood Warning\n\
             Area: Sacramento County\n\
             Severity: Severe\n\
             Description: Heavy rainfall expected.\n\
             Instructions: Move to higher ground."
        );
    }

    #[test]
    fn absent_fields_default_to_unknown() {
        let feature = serde_json::json!({
            "properties": { "event": "Heat Advisory" }
        });
        let block = format_alert(&feature);
        assert!(block.starts_with("Event: Heat Advisory\n"));
        assert_eq!(block.matches("Unknown").count(), 4);
    }

    #[test]
    fn record_without_properties_is_all_unknown() {
        let block = format_alert(&serde_json::json!({}));
        assert_eq!(block.matches("Unknown").count(), 5);
    }

    #[test]
    fn multiple_features_are_joined_with_separator() {
        let payload = serde_json::json!({
            "features": [
                {"properties": {"event": "Flood Warning"}},
                {"properties": {"event": "Heat Advisory"}},
            ]
        });
        let report = alerts_report(Some(payload));
        let blocks: Vec<&str> = report.split(ALERT_SEPARATOR).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Event: Flood Warning"));
        assert!(blocks[1].starts_with("Event: Heat Advisory"));
    }
}
