use crate::errors::GorillaError;
use super::provider::LLMProvider;
use super::anthropic::AnthropicProvider;
use super::openai::OpenAIProvider;
use super::local::LocalProvider;

pub const SUPPORTED_PROVIDERS: &[&str] = &["openai", "anthropic", "local"];

pub const DEFAULT_PROVIDER: &str = "openai";

pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<Box<dyn LLMProvider>, GorillaError> {
    match provider_name {
        "openai" => {
            require_key(provider_name, api_key)?;
            match base_url {
                Some(url) => Ok(Box::new(OpenAIProvider::with_base_url(api_key, model, url))),
                None => Ok(Box::new(OpenAIProvider::new(api_key, model))),
            }
        }
        "anthropic" => {
            require_key(provider_name, api_key)?;
            match base_url {
                Some(url) => Ok(Box::new(AnthropicProvider::with_base_url(api_key, model, url))),
                None => Ok(Box::new(AnthropicProvider::new(api_key, model))),
            }
        }
        "local" => Ok(Box::new(LocalProvider::new(base_url, model, api_key))),
        _ => Err(GorillaError::Config(format!("Unknown LLM provider: {}", provider_name))),
    }
}

/// Environment variable consulted when no key is given on the command line
/// or in the config file.
pub fn api_key_env_var(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "openai" => Some("OPENAI_API_KEY"),
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        _ => None,
    }
}

fn require_key(provider_name: &str, api_key: &str) -> Result<(), GorillaError> {
    if api_key.is_empty() {
        let hint = api_key_env_var(provider_name).unwrap_or("--api-key");
        return Err(GorillaError::Config(format!(
            "No API key for provider '{}'; set {} or pass --api-key",
            provider_name, hint
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_rejected() {
        let err = create_provider("nonesuch", "key", None, None).err().unwrap();
        assert!(matches!(err, GorillaError::Config(_)));
    }

    #[test]
    fn test_openai_requires_key() {
        assert!(create_provider("openai", "", None, None).is_err());
        let provider = create_provider("openai", "sk-test", Some("gpt-4o-mini"), None).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_local_needs_no_key() {
        let provider = create_provider("local", "", None, Some("http://127.0.0.1:8080/v1/")).unwrap();
        assert_eq!(provider.provider_name(), "local");
        assert_eq!(provider.label(), "local/qwen2.5-coder:7b");
    }

    #[test]
    fn test_api_key_env_var() {
        assert_eq!(api_key_env_var("anthropic"), Some("ANTHROPIC_API_KEY"));
        assert_eq!(api_key_env_var("local"), None);
    }
}
