use serde::{Deserialize, Serialize};

/// Contents of a `gorilla.yaml` file. Every section and field is optional;
/// anything left out takes its built-in default.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GorillaConfig {
    pub llm: Option<LLMConfig>,
    pub project: Option<ProjectConfig>,
    pub runner: Option<RunnerConfig>,
    pub repair: Option<RepairConfig>,
    pub oracle: Option<OracleConfig>,
    pub audit: Option<AuditConfig>,
    /// Directory of `<name>.txt` prompt overrides.
    pub prompts_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Literal key or `$ENV_VAR` reference.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Project-relative file locations and contract names.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProjectConfig {
    pub contract: Option<String>,
    pub base_template: Option<String>,
    pub artifact: Option<String>,
    pub suite_contract: Option<String>,
    pub template_contract: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RunnerConfig {
    pub binary: Option<String>,
    pub timeout_secs: Option<u64>,
    pub failure_marker: Option<String>,
    pub project_marker: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RepairConfig {
    pub max_repairs: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OracleConfig {
    /// Per-call bound. Unset means oracle calls are not timed out.
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AuditConfig {
    pub enabled: Option<bool>,
    /// Project-relative directory for run logs.
    pub directory: Option<String>,
}

impl GorillaConfig {
    /// Project-relative paths declared in the file, labelled by config key.
    pub fn project_relative_paths(&self) -> Vec<(&'static str, &str)> {
        let mut paths = Vec::new();
        if let Some(p) = &self.project {
            for (key, value) in [
                ("project.contract", &p.contract),
                ("project.base_template", &p.base_template),
                ("project.artifact", &p.artifact),
            ] {
                if let Some(v) = value {
                    paths.push((key, v.as_str()));
                }
            }
        }
        if let Some(dir) = self.audit.as_ref().and_then(|a| a.directory.as_deref()) {
            paths.push(("audit.directory", dir));
        }
        paths
    }
}
