use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use regex::{Captures, Regex};
use crate::errors::GorillaError;
use super::builtin::builtin;
use tracing::debug;

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@include\(([^)]+)\)").unwrap());
static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").unwrap());

/// Variables available for template interpolation in prompt files.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub contract_source: String,
    pub intent: String,
    pub test_fixtures: Option<String>,
    pub focus: Option<String>,
    pub spec_bundle: Option<String>,
    pub project_context: Option<String>,
    pub artifact: Option<String>,
    pub failure_kind: Option<String>,
    pub diagnostic: Option<String>,
    pub guidance: Option<String>,
    pub attempt: Option<u32>,
    pub max_attempts: Option<u32>,
}

impl PromptVariables {
    fn lookup(&self, name: &str) -> Option<String> {
        let value = match name {
            "CONTRACT_SOURCE" => Some(self.contract_source.clone()),
            "INTENT" => Some(self.intent.clone()),
            "TEST_FIXTURES" => self.test_fixtures.clone(),
            "FOCUS" => self.focus.clone(),
            "SPEC_BUNDLE" => self.spec_bundle.clone(),
            "PROJECT_CONTEXT" => self.project_context.clone(),
            "ARTIFACT" => self.artifact.clone(),
            "FAILURE_KIND" => self.failure_kind.clone(),
            "DIAGNOSTIC" => self.diagnostic.clone(),
            "GUIDANCE" => self.guidance.clone(),
            "ATTEMPT" => self.attempt.map(|a| a.to_string()),
            "MAX_ATTEMPTS" => self.max_attempts.map(|a| a.to_string()),
            _ => return None,
        };
        Some(value.unwrap_or_default())
    }
}

/// Loads prompt templates, preferring `<prompts_dir>/<name>.txt` over the
/// built-in template, and fills `{{VARIABLE}}` placeholders.
pub struct PromptLoader {
    prompts_dir: Option<PathBuf>,
}

const MAX_INCLUDE_DEPTH: u8 = 5;

impl PromptLoader {
    pub fn new(prompts_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = &prompts_dir {
            debug!(dir = %dir.display(), "PromptLoader using override directory");
        }
        Self { prompts_dir }
    }

    pub fn builtin_only() -> Self {
        Self { prompts_dir: None }
    }

    /// Load a prompt template by name (without .txt extension).
    pub fn load(&self, prompt_name: &str) -> Result<String, GorillaError> {
        if let Some(dir) = &self.prompts_dir {
            let file_path = dir.join(format!("{}.txt", prompt_name));
            if file_path.exists() {
                let content = std::fs::read_to_string(&file_path).map_err(|e| {
                    GorillaError::Config(format!("Failed to read prompt {}: {}", file_path.display(), e))
                })?;
                return self.process_includes(dir, &content, 0);
            }
        }
        builtin(prompt_name)
            .map(str::to_string)
            .ok_or_else(|| GorillaError::Config(format!("Unknown prompt template: {}", prompt_name)))
    }

    /// Load and interpolate in one step.
    pub fn render(&self, prompt_name: &str, vars: &PromptVariables) -> Result<String, GorillaError> {
        Ok(self.interpolate(&self.load(prompt_name)?, vars))
    }

    /// Replace {{VARIABLE}} placeholders in a single pass. Unset optional
    /// values become empty; unknown names are left untouched.
    pub fn interpolate(&self, template: &str, vars: &PromptVariables) -> String {
        VARIABLE_RE
            .replace_all(template, |caps: &Captures| {
                vars.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Process @include(path) directives recursively with depth limit.
    fn process_includes(&self, dir: &Path, content: &str, depth: u8) -> Result<String, GorillaError> {
        if depth >= MAX_INCLUDE_DEPTH {
            return Err(GorillaError::Config(format!(
                "Include depth limit ({}) exceeded, possible circular include",
                MAX_INCLUDE_DEPTH
            )));
        }

        let mut result = content.to_string();
        let matches: Vec<(String, String)> = INCLUDE_RE
            .captures_iter(content)
            .map(|cap| (cap[0].to_string(), cap[1].to_string()))
            .collect();

        for (full_match, include_path) in matches {
            let file_path = dir.join(&include_path);
            if !file_path.exists() {
                return Err(GorillaError::Config(format!(
                    "Included file not found: {} (referenced as @include({}))",
                    file_path.display(),
                    include_path
                )));
            }
            let included_content = std::fs::read_to_string(&file_path).map_err(|e| {
                GorillaError::Config(format!("Failed to read included file {}: {}", file_path.display(), e))
            })?;
            let processed = self.process_includes(dir, &included_content, depth + 1)?;
            result = result.replace(&full_match, &processed);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::builtin::{EXPLOIT_TEST, REPAIR};
    use std::fs;

    fn setup_test_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("shared")).unwrap();
        fs::write(dir.path().join("shared/_contract.txt"), "Contract:\n{{CONTRACT_SOURCE}}").unwrap();
        fs::write(
            dir.path().join("exploit-test.txt"),
            "@include(shared/_contract.txt)\nRequest: {{INTENT}}",
        )
        .unwrap();
        fs::write(dir.path().join("loop.txt"), "@include(loop.txt)").unwrap();
        dir
    }

    #[test]
    fn test_builtin_used_without_override_dir() {
        let loader = PromptLoader::builtin_only();
        assert!(loader.load(EXPLOIT_TEST).unwrap().contains("testLogic:"));
    }

    #[test]
    fn test_override_with_includes() {
        let dir = setup_test_dir();
        let loader = PromptLoader::new(Some(dir.path().to_path_buf()));
        let content = loader.load(EXPLOIT_TEST).unwrap();
        assert!(content.contains("Contract:\n{{CONTRACT_SOURCE}}"));
        assert!(!content.contains("@include"));
    }

    #[test]
    fn test_override_dir_falls_back_to_builtin() {
        let dir = setup_test_dir();
        let loader = PromptLoader::new(Some(dir.path().to_path_buf()));
        assert!(loader.load(REPAIR).unwrap().contains("{{DIAGNOSTIC}}"));
    }

    #[test]
    fn test_circular_include_rejected() {
        let dir = setup_test_dir();
        let loader = PromptLoader::new(Some(dir.path().to_path_buf()));
        assert!(loader.load("loop").is_err());
    }

    #[test]
    fn test_unknown_prompt_is_error() {
        assert!(PromptLoader::builtin_only().load("nonexistent").is_err());
    }

    #[test]
    fn test_interpolate_single_pass() {
        let loader = PromptLoader::builtin_only();
        let vars = PromptVariables {
            contract_source: "contract T { /* {{INTENT}} */ }".to_string(),
            intent: "check mint".to_string(),
            attempt: Some(2),
            ..Default::default()
        };
        let out = loader.interpolate("{{CONTRACT_SOURCE}} | {{INTENT}} | {{ATTEMPT}} | {{GUIDANCE}} | {{OTHER}}", &vars);
        assert_eq!(out, "contract T { /* {{INTENT}} */ } | check mint | 2 |  | {{OTHER}}");
    }
}
