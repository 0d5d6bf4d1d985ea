use std::path::{Path, PathBuf};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use crate::errors::GorillaError;
use tracing::warn;

/// One line in the run's JSONL audit file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    RunStarted { project: String, intent: String },
    ModeSelected { mode: String, category: Option<String> },
    OraclePrompt { purpose: String, prompt: String },
    OracleResponse { purpose: String, response: String, model: String },
    OracleError { purpose: String, error: String },
    Attempt { index: u32, passed: bool, failure_kind: Option<String>, diagnostic: String },
    RepairDiff { attempt: u32, diff: String },
    RunFinished { outcome: String, executions: usize, repair_calls: u32 },
}

/// Append-only audit log for one `run_test` invocation. Write failures are
/// logged and swallowed so auditing can never break the loop.
pub struct AuditTrail {
    path: Option<PathBuf>,
    file: Mutex<Option<tokio::fs::File>>,
}

impl AuditTrail {
    /// Open `<dir>/<yyyymmdd_hhmmss>_<run_id>.jsonl`, creating `dir`.
    pub async fn open(dir: &Path, run_id: &str) -> Result<Self, GorillaError> {
        tokio::fs::create_dir_all(dir).await?;
        let filename = format!("{}_{}.jsonl", Utc::now().format("%Y%m%d_%H%M%S"), run_id);
        let path = dir.join(filename);
        let file = tokio::fs::OpenOptions::new()
            .create(true).append(true).open(&path).await?;
        Ok(Self {
            path: Some(path),
            file: Mutex::new(Some(file)),
        })
    }

    pub fn disabled() -> Self {
        Self { path: None, file: Mutex::new(None) }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn record(&self, event: AuditEvent) {
        let mut guard = self.file.lock().await;
        let Some(file) = guard.as_mut() else {
            return;
        };
        if let Err(e) = write_event(file, &event).await {
            warn!(error = %e, "Failed to write audit event");
        }
    }
}

async fn write_event(file: &mut tokio::fs::File, event: &AuditEvent) -> Result<(), GorillaError> {
    let mut entry: Value = serde_json::to_value(event)?;
    entry["timestamp"] = json!(Utc::now().to_rfc3339());
    let mut line = serde_json::to_string(&entry)?;
    line.push('\n');
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
