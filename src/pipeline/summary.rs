use std::path::PathBuf;
use std::time::Duration;
use serde::Serialize;
use crate::intent::{OperatingMode, VulnerabilityCategory};
use crate::repair::{Attempt, RepairOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RunStatus {
    /// Environment not usable. No oracle call or execution happened.
    PreconditionFailed(String),
    /// Generation finished but the artifact could not be rendered.
    RenderFailed(String),
    Completed(RepairOutcome),
}

/// Everything one `run_test` invocation produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub status: RunStatus,
    pub mode: Option<OperatingMode>,
    pub category: Option<VulnerabilityCategory>,
    pub attempts: Vec<Attempt>,
    pub repair_calls: u32,
    pub duration: Duration,
    pub audit_path: Option<PathBuf>,
}

impl RunSummary {
    pub(crate) fn aborted(run_id: String, status: RunStatus, duration: Duration) -> Self {
        Self {
            run_id,
            status,
            mode: None,
            category: None,
            attempts: Vec::new(),
            repair_calls: 0,
            duration,
            audit_path: None,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.status, RunStatus::Completed(RepairOutcome::Success))
    }

    pub fn executions(&self) -> usize {
        self.attempts.len()
    }

    pub fn outcome_label(&self) -> &str {
        match &self.status {
            RunStatus::PreconditionFailed(_) => "precondition_failed",
            RunStatus::RenderFailed(_) => "render_failed",
            RunStatus::Completed(outcome) => outcome.as_str(),
        }
    }
}
