use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// API key lookup: explicit flag, then the config file entry, then the
/// provider's conventional environment variable. Empty values are skipped.
pub fn resolve_api_key(
    cli_key: Option<&str>,
    config_key: Option<&str>,
    provider_env_var: Option<&str>,
) -> Option<String> {
    if let Some(key) = cli_key.filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }
    if let Some(key) = config_key.map(resolve_credential).filter(|k| !k.is_empty() && !k.starts_with('$')) {
        return Some(key);
    }
    provider_env_var
        .and_then(|var| std::env::var(var).ok())
        .filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("sk-literal"), "sk-literal");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_GORILLA_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_GORILLA_CRED"), "secret123");
        std::env::remove_var("TEST_GORILLA_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_GORILLA_VAR"), "$NONEXISTENT_GORILLA_VAR");
    }

    #[test]
    fn test_api_key_precedence() {
        std::env::set_var("TEST_GORILLA_PROVIDER_KEY", "from-env");
        assert_eq!(
            resolve_api_key(Some("from-cli"), Some("from-config"), Some("TEST_GORILLA_PROVIDER_KEY")).as_deref(),
            Some("from-cli")
        );
        assert_eq!(
            resolve_api_key(None, Some("from-config"), Some("TEST_GORILLA_PROVIDER_KEY")).as_deref(),
            Some("from-config")
        );
        assert_eq!(
            resolve_api_key(None, Some("$NONEXISTENT_GORILLA_VAR"), Some("TEST_GORILLA_PROVIDER_KEY")).as_deref(),
            Some("from-env")
        );
        std::env::remove_var("TEST_GORILLA_PROVIDER_KEY");
        assert_eq!(resolve_api_key(None, None, Some("TEST_GORILLA_PROVIDER_KEY")), None);
    }
}
