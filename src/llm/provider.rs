use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;
use crate::errors::GorillaError;
use super::types::LLMResponse;

/// The code-generating oracle. Implementations carry no schema guarantees;
/// callers treat every response as untrusted free text.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// One prompt in, one free-text completion out.
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LLMResponse, GorillaError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;

    /// `provider/model`, as shown in logs and run summaries.
    fn label(&self) -> String {
        format!("{}/{}", self.provider_name(), self.model_name())
    }
}

/// Decode a provider reply. Non-JSON bodies (proxy error pages) become
/// `Null` so the status code still decides the error type.
pub(crate) async fn read_json_body(provider: &str, resp: Response) -> Result<Value, GorillaError> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| GorillaError::Network(format!("{} response body unreadable: {}", provider, e)))?;
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Ok(Value::Null),
        Err(e) => Err(GorillaError::LLMApi(format!("Failed to parse {} response: {}", provider, e))),
    }
}
