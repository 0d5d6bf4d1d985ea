use serde::Serialize;
use crate::diagnosis::FailureKind;
use crate::template::Artifact;
use super::decision::RepairOutcome;

/// One execution of one artifact. Attempts are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    /// Zero-based; equals the number of repairs applied before this run.
    pub index: u32,
    pub artifact: Artifact,
    pub verdict: bool,
    pub diagnostic: String,
    pub failure_kind: Option<FailureKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepairReport {
    pub attempts: Vec<Attempt>,
    pub outcome: RepairOutcome,
    pub repair_calls: u32,
}

impl RepairReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, RepairOutcome::Success)
    }

    pub fn executions(&self) -> usize {
        self.attempts.len()
    }

    pub fn final_artifact(&self) -> Option<&Artifact> {
        self.attempts.last().map(|a| &a.artifact)
    }
}
