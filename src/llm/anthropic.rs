use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::GorillaError;
use super::provider::{read_json_body, LLMProvider};
use super::types::{check_status, LLMResponse, GENERATION_TEMPERATURE, MAX_COMPLETION_TOKENS};
use tracing::{debug, warn};

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, "https://api.anthropic.com")
    }

    /// Messages-API compatible gateway or proxy.
    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("claude-sonnet-4-5-20250929").to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Concatenate every text block; tool or thinking blocks carry no test code.
fn text_content(data: &Value) -> Option<String> {
    let text: String = data["content"]
        .as_array()?
        .iter()
        .filter(|block| block["type"] == "text")
        .filter_map(|block| block["text"].as_str())
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GorillaError> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": GENERATION_TEMPERATURE,
            "messages": [{"role": "user", "content": prompt}]
        });
        if let Some(sys) = system {
            body["system"] = json!(sys);
        }

        let resp = self.client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| GorillaError::Network(format!("Anthropic API request failed: {}", e)))?;

        let status = resp.status();
        let data = read_json_body(self.provider_name(), resp).await?;
        check_status(self.provider_name(), status, &data)?;

        let content = text_content(&data)
            .ok_or_else(|| GorillaError::LLMApi("No text content in Anthropic response".into()))?;
        if data["stop_reason"] == "max_tokens" {
            warn!(model = %self.model, "Anthropic reply hit max_tokens, code may be cut off");
        }

        let input_tokens = data["usage"]["input_tokens"].as_u64();
        let output_tokens = data["usage"]["output_tokens"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "Anthropic completion");

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "anthropic" }
    fn model_name(&self) -> &str { &self.model }
}
