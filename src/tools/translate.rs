/// Translation Tool Implementation
///
/// Wraps a blocking translation provider so it can run without stalling
/// concurrent request handling. The provider call is synchronous (it uses a
/// blocking HTTP client), so the adapter offloads it to tokio's blocking
/// pool, gated by a semaphore that bounds how many translations run at once.
///
/// Provider failures are not absorbed: they propagate to the dispatcher as
/// tool errors and are reported to the caller as structured error content.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Semaphore;

use crate::core::error::ToolError;
use crate::core::registry::{MCPTool, ParamType, ToolHandler, ToolParam, ToolRegistry};
use crate::core::utils::{get_env_parsed, USER_AGENT};

/// Unofficial Google Translate endpoint used by the default provider.
const TRANSLATE_API_BASE: &str = "https://translate.googleapis.com/translate_a/single";

/// Default number of translations allowed to run concurrently.
const DEFAULT_POOL_SIZE: usize = 4;

/// A blocking translation provider.
///
/// `translate` performs the full remote call synchronously; implementations
/// must only be invoked from the blocking pool (see TranslatorAdapter).
/// Source language is auto-detected; the target language code is passed
/// through uninterpreted, so an invalid code surfaces as whatever error the
/// provider returns.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, target_lang: &str) -> Result<String, ToolError>;
}

/// Default provider backed by the public Google Translate endpoint.
pub struct GoogleTranslator;

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> Result<String, ToolError> {
        // The blocking client is built per call: constructing it on an async
        // runtime thread panics, and this method only ever runs on the
        // blocking pool where construction is allowed.
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ToolError::new)?;

        let response = client
            .get(TRANSLATE_API_BASE)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .map_err(ToolError::new)?;

        if !response.status().is_success() {
            return Err(ToolError::new(format!(
                "translation provider returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().map_err(ToolError::new)?;

        // The payload is a nested array; element 0 holds the translated
        // segments, each with the translated text at index 0.
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ToolError::new("unexpected translation payload shape"))?;
        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ToolError::new("translation provider returned no text"));
        }
        Ok(translated)
    }
}

/// Bridges blocking translation calls onto the async runtime.
///
/// Each call acquires a semaphore permit, runs the provider on the blocking
/// pool via spawn_blocking, and awaits the result. The semaphore bounds
/// concurrent provider calls so a burst of slow translations cannot exhaust
/// the blocking pool; unrelated requests keep making progress either way.
pub struct TranslatorAdapter {
    provider: Arc<dyn Translator>,
    permits: Arc<Semaphore>,
    /// Optional upper bound on one translation's wall-clock time. None means
    /// the call is bounded only by the provider's own transport timeout.
    timeout: Option<Duration>,
}

impl TranslatorAdapter {
    /// Build an adapter around a provider with an explicit pool size.
    pub fn new(provider: Arc<dyn Translator>, pool_size: usize, timeout: Option<Duration>) -> Self {
        Self {
            provider,
            permits: Arc::new(Semaphore::new(pool_size.max(1))),
            timeout,
        }
    }

    /// Build the production adapter from environment configuration.
    ///
    /// TRANSLATOR_POOL_SIZE sets the concurrency bound (default 4);
    /// TRANSLATE_TIMEOUT_SECS, when set to a nonzero value, bounds each call.
    pub fn from_env() -> Self {
        let pool_size = get_env_parsed("TRANSLATOR_POOL_SIZE", DEFAULT_POOL_SIZE);
        let timeout_secs: u64 = get_env_parsed("TRANSLATE_TIMEOUT_SECS", 0);
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        Self::new(Arc::new(GoogleTranslator), pool_size, timeout)
    }

    /// Translate text to the target language without blocking the runtime.
    pub async fn translate(&self, text: String, target_lang: String) -> Result<String, ToolError> {
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ToolError::new("translator pool is closed"))?;

        let provider = self.provider.clone();
        let call = tokio::task::spawn_blocking(move || provider.translate(&text, &target_lang));

        let joined = match self.timeout {
            Some(bound) => tokio::time::timeout(bound, call)
                .await
                .map_err(|_| ToolError::new("translation timed out"))?,
            None => call.await,
        };
        joined.map_err(|e| ToolError::new(format!("translation task failed: {e}")))?
    }
}

/// Register the translate_text tool with the tool registry.
///
/// # Arguments
/// * `registry` - Mutable reference to the tool registry where the tool will be registered
/// * `adapter` - Shared translator adapter (bounded blocking-call bridge)
pub fn register(registry: &mut ToolRegistry, adapter: Arc<TranslatorAdapter>) {
    let tool = MCPTool {
        name: "translate_text",
        description: "Translate text from one language to another.",
        params: vec![
            ToolParam::required("text", ParamType::String, "Text to translate"),
            ToolParam::required(
                "target_lang",
                ParamType::String,
                "Target language code (e.g. \"es\" for Spanish, \"fr\" for French)",
            ),
        ],
    };

    let handler: ToolHandler = Box::new(move |args: Value| {
        let adapter = adapter.clone();
        Box::pin(async move {
            let text = args
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::new("missing coerced field 'text'"))?
                .to_string();
            let target_lang = args
                .get("target_lang")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::new("missing coerced field 'target_lang'"))?
                .to_string();

            let translated = adapter.translate(text.clone(), target_lang.clone()).await?;
            Ok(serde_json::json!({
                "original": text,
                "translated": translated,
                "target_lang": target_lang,
            }))
        })
    });

    registry.register(tool, handler);
}
