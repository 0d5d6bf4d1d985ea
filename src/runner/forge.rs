use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio::process::Command;
use crate::errors::GorillaError;
use crate::template::Artifact;
use super::output::{format_diagnostic, strip_ansi, verdict};
use super::{ExecutionOutcome, TestRunner};
use tracing::{debug, info, warn};

const INSTALL_HINT: &str = "Install command: curl -L https://foundry.paradigm.xyz | bash";

/// Everything the adapter needs to know about the runner and where the
/// artifact lives. Paths are relative to the project root.
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub binary: String,
    pub artifact_path: PathBuf,
    pub suite_contract: String,
    pub timeout: Duration,
    pub failure_marker: String,
    pub project_marker: String,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            binary: "forge".to_string(),
            artifact_path: PathBuf::from("test/GorillaTest.t.sol"),
            suite_contract: "GorillaTest".to_string(),
            timeout: Duration::from_secs(60),
            failure_marker: "FAILED".to_string(),
            project_marker: "foundry.toml".to_string(),
        }
    }
}

/// Foundry `forge` driven as a subprocess rooted at the project directory.
pub struct ForgeRunner {
    project_root: PathBuf,
    settings: RunnerSettings,
}

impl ForgeRunner {
    pub fn new(project_root: impl Into<PathBuf>, settings: RunnerSettings) -> Self {
        Self {
            project_root: project_root.into(),
            settings,
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.project_root.join(&self.settings.artifact_path)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// `forge --version` must succeed.
    pub async fn check_installation(&self) -> Result<String, GorillaError> {
        let output = self
            .command(&["--version"])
            .output()
            .await
            .map_err(|e| self.not_installed(e.to_string()))?;
        if !output.status.success() {
            return Err(self.not_installed(format!("exit status {}", output.status)));
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(binary = %self.settings.binary, version = %version, "Runner available");
        Ok(version)
    }

    /// Run `forge init --no-git .` when the project marker is missing.
    /// Returns whether an init was performed.
    pub async fn initialize_project(&self) -> Result<bool, GorillaError> {
        let marker = self.project_root.join(&self.settings.project_marker);
        if marker.exists() {
            return Ok(false);
        }

        info!(project = %self.project_root.display(), "Project marker missing, initialising project");
        let status = self
            .command(&["init", "--no-git", "."])
            .status()
            .await
            .map_err(|e| GorillaError::Precondition(format!("Project initialisation failed: {}", e)))?;
        if !status.success() {
            return Err(GorillaError::Precondition(format!(
                "Project initialisation failed: {} init exited with {}",
                self.settings.binary, status
            )));
        }
        Ok(true)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.settings.binary);
        cmd.args(args)
            .current_dir(&self.project_root)
            .kill_on_drop(true);
        cmd
    }

    fn not_installed(&self, detail: String) -> GorillaError {
        GorillaError::Precondition(format!(
            "'{}' is not installed or not runnable ({}). {}",
            self.settings.binary, detail, INSTALL_HINT
        ))
    }

    async fn write_artifact(&self, artifact: &Artifact) -> std::io::Result<PathBuf> {
        let path = self.artifact_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, artifact.as_str()).await?;
        Ok(path)
    }

    fn outcome_from_output(&self, output: Output, duration: Duration) -> ExecutionOutcome {
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        let stderr = strip_ansi(&String::from_utf8_lossy(&output.stderr));
        let exit_code = output.status.code();
        let passed = verdict(exit_code, &stdout, &self.settings.failure_marker);
        ExecutionOutcome {
            passed,
            diagnostic: format_diagnostic(&stdout, &stderr),
            exit_code,
            duration,
        }
    }
}

#[async_trait]
impl TestRunner for ForgeRunner {
    async fn prepare(&self) -> Result<(), GorillaError> {
        self.check_installation().await?;
        self.initialize_project().await?;
        Ok(())
    }

    async fn write_and_run(&self, artifact: &Artifact) -> ExecutionOutcome {
        let path = match self.write_artifact(artifact).await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Failed to write test file");
                return ExecutionOutcome::failed(format!("Failed to write test file: {}", e));
            }
        };
        debug!(path = %path.display(), lines = artifact.line_count(), "Test file written");

        let start = Instant::now();
        let mut cmd = self.command(&["test", "--match-contract", &self.settings.suite_contract, "-vvv"]);
        let result = tokio::time::timeout(self.settings.timeout, cmd.output()).await;
        let duration = start.elapsed();

        match result {
            Err(_) => ExecutionOutcome::failed(format!(
                "Test execution timed out ({} seconds)",
                self.settings.timeout.as_secs()
            )),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => ExecutionOutcome::failed(format!(
                "Command '{}' not found. Please ensure Foundry is installed.",
                self.settings.binary
            )),
            Ok(Err(e)) => {
                ExecutionOutcome::failed(format!("An error occurred while executing tests: {}", e))
            }
            Ok(Ok(output)) => {
                let outcome = self.outcome_from_output(output, duration);
                info!(
                    passed = outcome.passed,
                    exit_code = ?outcome.exit_code,
                    duration_ms = duration.as_millis() as u64,
                    "Runner finished"
                );
                outcome
            }
        }
    }

    fn name(&self) -> &str {
        &self.settings.binary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// `sh` treats the first argument (`test`) as a script path, so a file
    /// named `test` in the project root stands in for the runner.
    fn shell_runner(dir: &TempDir, script: &str, timeout: Duration) -> ForgeRunner {
        std::fs::write(dir.path().join("test"), script).unwrap();
        ForgeRunner::new(
            dir.path(),
            RunnerSettings {
                binary: "sh".to_string(),
                artifact_path: PathBuf::from("out/GorillaTest.t.sol"),
                timeout,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_missing_binary_is_normalised() {
        let dir = TempDir::new().unwrap();
        let runner = ForgeRunner::new(
            dir.path(),
            RunnerSettings {
                binary: "gorilla-no-such-runner-binary".to_string(),
                ..Default::default()
            },
        );
        let outcome = runner.write_and_run(&Artifact::new("contract X {}")).await;
        assert!(!outcome.passed);
        assert!(outcome.diagnostic.contains("not found"));
        let written = std::fs::read_to_string(dir.path().join("test/GorillaTest.t.sol")).unwrap();
        assert_eq!(written, "contract X {}");
    }

    #[tokio::test]
    async fn test_missing_binary_fails_prepare() {
        let dir = TempDir::new().unwrap();
        let runner = ForgeRunner::new(
            dir.path(),
            RunnerSettings {
                binary: "gorilla-no-such-runner-binary".to_string(),
                ..Default::default()
            },
        );
        let err = runner.prepare().await.unwrap_err();
        assert!(matches!(err, GorillaError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_zero_exit_with_marker_fails() {
        let dir = TempDir::new().unwrap();
        let runner = shell_runner(
            &dir,
            "printf '\\033[31m[FAIL]\\033[0m testVulnerability()\\nSuite result: FAILED. 0 passed; 1 failed\\n'\nexit 0\n",
            Duration::from_secs(30),
        );
        let outcome = runner.write_and_run(&Artifact::new("// artifact")).await;
        assert_eq!(outcome.exit_code, Some(0));
        assert!(!outcome.passed);
        assert!(outcome.diagnostic.starts_with("STDOUT:\n[FAIL] testVulnerability()"));
        assert!(!outcome.diagnostic.contains('\x1b'));
    }

    #[tokio::test]
    async fn test_clean_run_passes() {
        let dir = TempDir::new().unwrap();
        let runner = shell_runner(&dir, "echo 'Suite result: ok. 1 passed'\necho warn >&2\n", Duration::from_secs(30));
        let outcome = runner.write_and_run(&Artifact::new("// artifact")).await;
        assert!(outcome.passed);
        assert!(outcome.diagnostic.contains("STDERR:\nwarn"));
    }

    #[tokio::test]
    async fn test_timeout_is_normalised() {
        let dir = TempDir::new().unwrap();
        let runner = shell_runner(&dir, "sleep 5\n", Duration::from_millis(200));
        let outcome = runner.write_and_run(&Artifact::new("// artifact")).await;
        assert!(!outcome.passed);
        assert!(outcome.diagnostic.starts_with("Test execution timed out"));
    }

    #[tokio::test]
    async fn test_initialize_skipped_when_marker_present() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("foundry.toml"), "[profile.default]\n").unwrap();
        let runner = ForgeRunner::new(dir.path(), RunnerSettings::default());
        assert!(!runner.initialize_project().await.unwrap());
    }

    /// Same `sh` stand-in: `init --no-git .` runs a script named `init`.
    fn init_runner(dir: &TempDir, script: &str) -> ForgeRunner {
        std::fs::write(dir.path().join("init"), script).unwrap();
        ForgeRunner::new(
            dir.path(),
            RunnerSettings {
                binary: "sh".to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_initialize_runs_once_when_marker_missing() {
        let dir = TempDir::new().unwrap();
        let runner = init_runner(&dir, "echo \"$@\" >> init.log\ntouch foundry.toml\n");

        assert!(runner.initialize_project().await.unwrap());
        assert!(dir.path().join("foundry.toml").exists());
        assert!(!runner.initialize_project().await.unwrap());

        let log = std::fs::read_to_string(dir.path().join("init.log")).unwrap();
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["--no-git ."]);
    }

    #[tokio::test]
    async fn test_failed_initialize_is_precondition() {
        let dir = TempDir::new().unwrap();
        let runner = init_runner(&dir, "exit 3\n");
        let err = runner.initialize_project().await.unwrap_err();
        assert!(matches!(err, GorillaError::Precondition(_)));
        assert!(!dir.path().join("foundry.toml").exists());
    }
}
