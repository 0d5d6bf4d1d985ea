use std::path::Path;
use crate::errors::GorillaError;
use crate::llm::router::SUPPORTED_PROVIDERS;
use super::types::GorillaConfig;
use super::security::{validate_project_paths, validate_security_patterns};
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;
pub const MAX_REPAIRS_LIMIT: u32 = 10;
const MAX_ORACLE_RETRIES: u32 = 5;

/// Bound shared by the config file and the `--max-repairs` flag.
pub fn validate_max_repairs(key: &str, max: u32) -> Result<(), GorillaError> {
    if max > MAX_REPAIRS_LIMIT {
        return Err(GorillaError::Config(format!(
            "{} must be at most {}, got {}",
            key, MAX_REPAIRS_LIMIT, max
        )));
    }
    Ok(())
}

pub async fn parse_config(path: &Path) -> Result<GorillaConfig, GorillaError> {
    if !path.exists() {
        return Err(GorillaError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(GorillaError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Same pipeline as [`parse_config`] on in-memory YAML. An empty document
/// yields the all-defaults config.
pub fn parse_config_str(content: &str) -> Result<GorillaConfig, GorillaError> {
    if content.trim().is_empty() {
        return Ok(GorillaConfig::default());
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: GorillaConfig = serde_yaml::from_value(yaml)?;

    validate_project_paths(&config)?;
    validate_semantics(&config)?;

    Ok(config)
}

/// Structural check against the JSON schema. Advisory: findings are logged,
/// typed deserialisation and semantic checks decide acceptance.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), GorillaError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| GorillaError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| GorillaError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &GorillaConfig) -> Result<(), GorillaError> {
    if let Some(provider) = config.llm.as_ref().and_then(|l| l.provider.as_deref()) {
        if !SUPPORTED_PROVIDERS.contains(&provider) {
            return Err(GorillaError::Config(format!(
                "Unknown LLM provider '{}'. Supported: {}",
                provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }
    }

    if config.runner.as_ref().and_then(|r| r.timeout_secs) == Some(0) {
        return Err(GorillaError::Config("runner.timeout_secs must be positive".into()));
    }
    if config.oracle.as_ref().and_then(|o| o.timeout_secs) == Some(0) {
        return Err(GorillaError::Config("oracle.timeout_secs must be positive".into()));
    }

    if let Some(max) = config.repair.as_ref().and_then(|r| r.max_repairs) {
        validate_max_repairs("repair.max_repairs", max)?;
    }
    if let Some(retries) = config.oracle.as_ref().and_then(|o| o.max_retries) {
        if retries > MAX_ORACLE_RETRIES {
            return Err(GorillaError::Config(format!(
                "oracle.max_retries must be at most {}, got {}",
                MAX_ORACLE_RETRIES, retries
            )));
        }
    }

    if let Some(project) = &config.project {
        for (key, name) in [
            ("project.suite_contract", &project.suite_contract),
            ("project.template_contract", &project.template_contract),
        ] {
            if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(GorillaError::Config(format!("{} must not be empty", key)));
            }
        }
    }

    if config.runner.as_ref().and_then(|r| r.failure_marker.as_deref()).is_some_and(str::is_empty) {
        return Err(GorillaError::Config("runner.failure_marker must not be empty".into()));
    }

    Ok(())
}
