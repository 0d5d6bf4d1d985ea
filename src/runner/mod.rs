//! Execution adapter: writes the artifact under the project and runs the
//! external test runner against it.

pub mod forge;
pub mod output;

pub use forge::{ForgeRunner, RunnerSettings};
pub use output::{format_diagnostic, strip_ansi, verdict};

use std::time::Duration;
use async_trait::async_trait;
use crate::errors::GorillaError;
use crate::template::Artifact;

/// Result of one execution. Every failure mode of the adapter ends up here
/// as `passed = false` with an explanatory diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub passed: bool,
    pub diagnostic: String,
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

impl ExecutionOutcome {
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            passed: false,
            diagnostic: diagnostic.into(),
            exit_code: None,
            duration: Duration::ZERO,
        }
    }
}

#[async_trait]
pub trait TestRunner: Send + Sync {
    /// Environment readiness: runner installed and project initialised.
    /// Called once per invocation before any generation.
    async fn prepare(&self) -> Result<(), GorillaError>;

    /// Overwrite the artifact file and execute it. Never returns an error.
    async fn write_and_run(&self, artifact: &Artifact) -> ExecutionOutcome;

    fn name(&self) -> &str;
}
