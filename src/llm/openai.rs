use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use crate::errors::GorillaError;
use super::provider::{read_json_body, LLMProvider};
use super::types::{chat_messages, check_status, parse_chat_completion, LLMResponse, GENERATION_TEMPERATURE, MAX_COMPLETION_TOKENS};
use tracing::debug;

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, "https://api.openai.com/v1")
    }

    /// Any OpenAI-compatible chat-completions endpoint.
    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gpt-4o").to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GorillaError> {
        let body = json!({
            "model": self.model,
            "messages": chat_messages(prompt, system),
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": GENERATION_TEMPERATURE,
        });

        let resp = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GorillaError::Network(format!("OpenAI request failed: {}", e)))?;

        let status = resp.status();
        let data = read_json_body(self.provider_name(), resp).await?;
        check_status(self.provider_name(), status, &data)?;

        let response = parse_chat_completion(self.provider_name(), &self.model, &data)?;
        debug!(
            model = %response.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "OpenAI completion"
        );
        Ok(response)
    }

    fn provider_name(&self) -> &str { "openai" }
    fn model_name(&self) -> &str { &self.model }
}
