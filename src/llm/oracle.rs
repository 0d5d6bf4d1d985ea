use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::audit::{AuditEvent, AuditTrail};
use crate::errors::{with_retry, GorillaError, RetryConfig};
use crate::utils::truncation::truncate_error;
use super::provider::LLMProvider;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str = "You are a smart contract security engineer who writes Foundry (Solidity) tests.";

/// The oracle as the generation and repair code sees it: one `ask` call that
/// returns raw text, with retries, an optional wall-clock bound and full
/// audit recording layered on top of the provider.
pub struct Oracle {
    provider: Arc<dyn LLMProvider>,
    retry: RetryConfig,
    timeout: Option<Duration>,
    audit: Arc<AuditTrail>,
}

impl Oracle {
    pub fn new(provider: Arc<dyn LLMProvider>, audit: Arc<AuditTrail>) -> Self {
        Self {
            provider,
            retry: RetryConfig::default(),
            timeout: None,
            audit,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Bound each provider call. Unset means the call may block indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Send `prompt` and return the raw response text. `purpose` labels the
    /// call in logs and the audit trail.
    pub async fn ask(&self, purpose: &str, prompt: &str) -> Result<String, GorillaError> {
        let start = Instant::now();
        debug!(purpose, prompt = %prompt, "Oracle prompt");
        self.audit.record(AuditEvent::OraclePrompt {
            purpose: purpose.to_string(),
            prompt: prompt.to_string(),
        }).await;

        let result = with_retry(purpose, &self.retry, || self.complete_once(purpose, prompt)).await;

        match result {
            Ok(response) => {
                info!(
                    purpose,
                    provider = self.provider.provider_name(),
                    model = %response.model,
                    duration_ms = start.elapsed().as_millis() as u64,
                    chars = response.content.len(),
                    "Oracle responded"
                );
                debug!(purpose, response = %response.content, "Oracle response");
                self.audit.record(AuditEvent::OracleResponse {
                    purpose: purpose.to_string(),
                    response: response.content.clone(),
                    model: response.model,
                }).await;
                Ok(response.content)
            }
            Err(e) => {
                warn!(purpose, error = %truncate_error(&e.to_string()), "Oracle call failed");
                self.audit.record(AuditEvent::OracleError {
                    purpose: purpose.to_string(),
                    error: e.to_string(),
                }).await;
                Err(e)
            }
        }
    }

    async fn complete_once(&self, purpose: &str, prompt: &str) -> Result<super::LLMResponse, GorillaError> {
        let call = self.provider.complete(prompt, Some(SYSTEM_PROMPT));
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                GorillaError::Timeout(format!("Oracle call '{}' exceeded {}s", purpose, limit.as_secs()))
            })?,
            None => call.await,
        }
    }
}
