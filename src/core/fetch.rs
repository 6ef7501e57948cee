/// Remote JSON Fetcher
///
/// This module performs outbound HTTP GET requests against upstream JSON APIs
/// (currently the National Weather Service). Failures are values, not errors:
/// `fetch_json` returns `None` on any transport error, timeout, non-2xx
/// status, or undecodable body, so callers branch on presence/absence instead
/// of handling errors. This keeps upstream unavailability a graceful
/// degradation rather than a dispatcher failure.

use std::time::Duration;

use serde_json::Value;

use crate::core::utils::USER_AGENT;

/// Fixed timeout applied to every upstream request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared HTTP client used for upstream fetches.
///
/// The client carries the identifying User-Agent and the fetch timeout so
/// individual call sites cannot forget them. One client is built per registry
/// at startup and reused across requests (reqwest clients pool connections
/// internally and are cheap to clone).
pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
}

/// Fetch a URL and parse the response body as JSON.
///
/// Sends `Accept: application/json` on every request. Returns `Some(body)`
/// only for a 2xx response with a decodable JSON body; every failure mode
/// (connect error, timeout, non-2xx status, malformed JSON) returns `None`
/// after logging at warn level. Never panics and never returns an error type.
///
/// Awaiting the response suspends only the calling task; other requests on
/// the runtime keep making progress.
///
/// # Arguments
/// * `client` - Shared HTTP client (carries User-Agent and timeout)
/// * `url` - Fully built URL to fetch
pub async fn fetch_json(client: &reqwest::Client, url: &str) -> Option<Value> {
    let response = match client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(url, error = %e, "upstream request failed");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!(url, status = %response.status(), "upstream returned non-success status");
        return None;
    }

    match response.json::<Value>().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(url, error = %e, "upstream body was not valid JSON");
            None
        }
    }
}
