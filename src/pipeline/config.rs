use std::path::PathBuf;
use std::time::Duration;
use crate::config::GorillaConfig;
use crate::repair::DEFAULT_MAX_REPAIRS;
use crate::runner::RunnerSettings;

/// Resolved, immutable settings for one pipeline. Built from defaults or a
/// parsed config file; the LLM provider itself is supplied separately.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target contract, relative to the project.
    pub contract_path: PathBuf,
    pub base_template_path: PathBuf,
    /// Contract name in the base template, renamed to the suite name.
    pub template_contract: String,
    pub runner: RunnerSettings,
    pub max_repairs: u32,
    pub oracle_timeout: Option<Duration>,
    pub oracle_retries: u32,
    pub audit_enabled: bool,
    pub audit_dir: PathBuf,
    pub prompts_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            contract_path: PathBuf::from("src/SimpleERC20.sol"),
            base_template_path: PathBuf::from("test/GorillaBase.t.sol"),
            template_contract: "GorillaBaseTest".to_string(),
            runner: RunnerSettings::default(),
            max_repairs: DEFAULT_MAX_REPAIRS,
            oracle_timeout: None,
            oracle_retries: 0,
            audit_enabled: true,
            audit_dir: PathBuf::from(".gorilla/runs"),
            prompts_dir: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_config(config: &GorillaConfig) -> Self {
        let mut resolved = Self::default();

        if let Some(p) = &config.project {
            if let Some(v) = &p.contract {
                resolved.contract_path = PathBuf::from(v);
            }
            if let Some(v) = &p.base_template {
                resolved.base_template_path = PathBuf::from(v);
            }
            if let Some(v) = &p.artifact {
                resolved.runner.artifact_path = PathBuf::from(v);
            }
            if let Some(v) = &p.suite_contract {
                resolved.runner.suite_contract = v.clone();
            }
            if let Some(v) = &p.template_contract {
                resolved.template_contract = v.clone();
            }
        }

        if let Some(r) = &config.runner {
            if let Some(v) = &r.binary {
                resolved.runner.binary = v.clone();
            }
            if let Some(secs) = r.timeout_secs {
                resolved.runner.timeout = Duration::from_secs(secs);
            }
            if let Some(v) = &r.failure_marker {
                resolved.runner.failure_marker = v.clone();
            }
            if let Some(v) = &r.project_marker {
                resolved.runner.project_marker = v.clone();
            }
        }

        if let Some(max) = config.repair.as_ref().and_then(|r| r.max_repairs) {
            resolved.max_repairs = max;
        }

        if let Some(o) = &config.oracle {
            resolved.oracle_timeout = o.timeout_secs.map(Duration::from_secs);
            if let Some(retries) = o.max_retries {
                resolved.oracle_retries = retries;
            }
        }

        if let Some(a) = &config.audit {
            if let Some(enabled) = a.enabled {
                resolved.audit_enabled = enabled;
            }
            if let Some(dir) = &a.directory {
                resolved.audit_dir = PathBuf::from(dir);
            }
        }

        resolved.prompts_dir = config.prompts_dir.as_ref().map(PathBuf::from);
        resolved
    }

    /// Contract name used in repair context, taken from the file stem.
    pub fn contract_name(&self) -> String {
        self.contract_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Contract".to_string())
    }

    pub fn base_template_name(&self) -> String {
        self.base_template_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.base_template_path.display().to_string())
    }
}
