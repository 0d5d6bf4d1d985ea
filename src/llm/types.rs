use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::errors::GorillaError;

/// Room for a full Solidity test file in one reply.
pub const MAX_COMPLETION_TOKENS: u32 = 8192;

/// Low temperature keeps repairs close to the artifact they were asked to fix.
pub const GENERATION_TEMPERATURE: f64 = 0.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: String,
}

impl LLMResponse {
    pub fn text(content: impl Into<String>, model: &str) -> Self {
        Self {
            content: content.into(),
            input_tokens: None,
            output_tokens: None,
            model: model.to_string(),
        }
    }
}

/// Map an HTTP status plus decoded body to the error taxonomy. Rate limits and
/// server errors stay retryable; bad keys do not.
pub(crate) fn check_status(provider: &str, status: StatusCode, body: &Value) -> Result<(), GorillaError> {
    let detail = body["error"]["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .unwrap_or("no error message");

    match status.as_u16() {
        429 => Err(GorillaError::RateLimit(format!("{} rate limit: {}", provider, detail))),
        401 | 403 => Err(GorillaError::Authentication(format!("{} rejected the API key: {}", provider, detail))),
        _ if !status.is_success() => Err(GorillaError::LLMApi(format!("{} returned {}: {}", provider, status, detail))),
        _ if !body["error"].is_null() => Err(GorillaError::LLMApi(format!("{}: {}", provider, detail))),
        _ => Ok(()),
    }
}

/// Messages array for OpenAI-compatible chat completions.
pub(crate) fn chat_messages(prompt: &str, system: Option<&str>) -> Vec<Value> {
    let mut messages = Vec::with_capacity(2);
    if let Some(sys) = system {
        messages.push(json!({"role": "system", "content": sys}));
    }
    messages.push(json!({"role": "user", "content": prompt}));
    messages
}

/// Pull the first choice out of a chat-completions body. An empty completion
/// is an error so the oracle's callers fall back to their defaults.
pub(crate) fn parse_chat_completion(provider: &str, model: &str, data: &Value) -> Result<LLMResponse, GorillaError> {
    let content = data["choices"][0]["message"]["content"]
        .as_str()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| GorillaError::LLMApi(format!("No content in {} response", provider)))?;

    Ok(LLMResponse {
        content: content.to_string(),
        input_tokens: data["usage"]["prompt_tokens"].as_u64(),
        output_tokens: data["usage"]["completion_tokens"].as_u64(),
        model: data["model"].as_str().unwrap_or(model).to_string(),
    })
}
