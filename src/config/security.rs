use std::path::{Component, Path};
use crate::errors::GorillaError;
use super::types::GorillaConfig;

const DANGEROUS_PATTERNS: &[&str] = &[
    "../",
    "..\\",
    "file:",
];

/// Reject any string value carrying a traversal or file-URI pattern.
pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), GorillaError> {
    check_value(value, &[])
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), GorillaError> {
    match value {
        serde_yaml::Value::String(s) => {
            let lower = s.to_lowercase();
            let hit = if lower.trim() == ".." {
                Some("..")
            } else {
                DANGEROUS_PATTERNS.iter().copied().find(|p| lower.contains(p))
            };
            match hit {
                Some(pattern) => {
                    let path_str = if path.is_empty() { "root".to_string() } else { path.join(".") };
                    Err(GorillaError::Config(
                        format!("Dangerous pattern '{}' found at config path: {}", pattern, path_str)
                    ))
                }
                None => Ok(()),
            }
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Files the loop reads or writes must stay under the project directory.
pub fn validate_project_paths(config: &GorillaConfig) -> Result<(), GorillaError> {
    for (key, value) in config.project_relative_paths() {
        if !is_project_relative(Path::new(value)) {
            return Err(GorillaError::Config(format!(
                "{} must be a relative path inside the project: {}",
                key, value
            )));
        }
    }
    Ok(())
}

fn is_project_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    fn yaml(s: &str) -> serde_yaml::Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_safe_config_passes() {
        assert!(validate_security_patterns(&yaml("project:\n  contract: src/Token.sol\nrepair:\n  max_repairs: 3")).is_ok());
    }

    #[test]
    fn test_traversal_blocked() {
        assert!(validate_security_patterns(&yaml("project:\n  artifact: ../../etc/passwd")).is_err());
        assert!(validate_security_patterns(&yaml("project:\n  artifact: '..\\evil.sol'")).is_err());
        assert!(validate_security_patterns(&yaml("audit:\n  directory: '..'")).is_err());
    }

    #[test]
    fn test_file_uri_blocked() {
        assert!(validate_security_patterns(&yaml("llm:\n  base_url: 'file:///etc/passwd'")).is_err());
    }

    #[test]
    fn test_sequence_values_checked() {
        assert!(validate_security_patterns(&yaml("items:\n  - ok\n  - '../x'")).is_err());
    }

    #[test]
    fn test_absolute_project_path_rejected() {
        let config = GorillaConfig {
            project: Some(ProjectConfig {
                artifact: Some("/tmp/GorillaTest.t.sol".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = validate_project_paths(&config).unwrap_err();
        assert!(err.to_string().contains("project.artifact"));
    }

    #[test]
    fn test_relative_project_paths_accepted() {
        let config = GorillaConfig {
            project: Some(ProjectConfig {
                contract: Some("./src/Token.sol".into()),
                artifact: Some("test/GorillaTest.t.sol".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate_project_paths(&config).is_ok());
    }
}
