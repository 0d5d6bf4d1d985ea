use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use crate::errors::GorillaError;
use super::provider::{read_json_body, LLMProvider};
use super::types::{chat_messages, check_status, parse_chat_completion, LLMResponse, GENERATION_TEMPERATURE, MAX_COMPLETION_TOKENS};

/// Ollama, llama.cpp or any other OpenAI-compatible server on the local
/// machine. The key is optional and only sent when configured.
pub struct LocalProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl LocalProvider {
    pub fn new(base_url: Option<&str>, model: Option<&str>, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or("http://localhost:11434/v1").trim_end_matches('/').to_string(),
            model: model.unwrap_or("qwen2.5-coder:7b").to_string(),
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
        }
    }
}

#[async_trait]
impl LLMProvider for LocalProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GorillaError> {
        let body = json!({
            "model": self.model,
            "messages": chat_messages(prompt, system),
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": GENERATION_TEMPERATURE,
            "stream": false,
        });

        let mut request = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await.map_err(|e| {
            GorillaError::Network(format!("Local LLM at {} unreachable: {}", self.base_url, e))
        })?;

        let status = resp.status();
        let data = read_json_body(self.provider_name(), resp).await?;
        check_status(self.provider_name(), status, &data)?;
        parse_chat_completion(self.provider_name(), &self.model, &data)
    }

    fn provider_name(&self) -> &str { "local" }
    fn model_name(&self) -> &str { &self.model }
}
