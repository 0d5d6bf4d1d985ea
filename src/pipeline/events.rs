use tokio::sync::mpsc;
use crate::diagnosis::FailureKind;
use crate::intent::{OperatingMode, VulnerabilityCategory};

/// Progress messages from a running loop, for live display.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    RunStarted {
        run_id: String,
        project: String,
        intent: String,
    },
    /// The environment is not usable; nothing was generated or executed.
    PreconditionFailed {
        reason: String,
    },
    ModeSelected {
        mode: OperatingMode,
        category: Option<VulnerabilityCategory>,
    },
    SpecsGenerated {
        summary: String,
    },
    AttemptStarted {
        index: u32,
        max_executions: u32,
    },
    AttemptPassed {
        index: u32,
        duration_ms: u64,
    },
    AttemptFailed {
        index: u32,
        kind: FailureKind,
        diagnostic: String,
    },
    RepairRequested {
        attempt: u32,
        max_repairs: u32,
    },
    RepairUnproductive {
        attempt: u32,
    },
    RunFinished {
        passed: bool,
        outcome: String,
        executions: usize,
        repair_calls: u32,
        duration_ms: u64,
    },
}

/// Optional sender half. Emitting with no listener, or after the listener
/// has gone away, is a no-op.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<LoopEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<LoopEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn emit(&self, event: LoopEvent) {
        if let Some(ref tx) = self.tx {
            let _ = tx.send(event);
        }
    }
}
