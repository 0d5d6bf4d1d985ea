use std::sync::Arc;
use similar::TextDiff;
use crate::audit::{AuditEvent, AuditTrail};
use crate::diagnosis::{classify, guidance_for, FailureKind};
use crate::llm::Oracle;
use crate::parser::extract_code;
use crate::pipeline::events::{EventSink, LoopEvent};
use crate::prompts::{builtin, PromptLoader, PromptVariables};
use crate::runner::TestRunner;
use crate::template::Artifact;
use super::attempt::{Attempt, RepairReport};
use super::decision::{is_unproductive, next_step, ExhaustReason, NextStep, RepairOutcome};
use tracing::{info, warn};

/// Three repairs, so at most four executions.
pub const DEFAULT_MAX_REPAIRS: u32 = 3;

/// Drives one artifact through execute / diagnose / repair until it passes
/// or the loop gives up. Attempts run strictly one after another.
pub struct RepairDriver {
    oracle: Arc<Oracle>,
    prompts: Arc<PromptLoader>,
    runner: Arc<dyn TestRunner>,
    audit: Arc<AuditTrail>,
    events: EventSink,
    max_repairs: u32,
}

impl RepairDriver {
    pub fn new(
        oracle: Arc<Oracle>,
        prompts: Arc<PromptLoader>,
        runner: Arc<dyn TestRunner>,
        audit: Arc<AuditTrail>,
    ) -> Self {
        Self {
            oracle,
            prompts,
            runner,
            audit,
            events: EventSink::default(),
            max_repairs: DEFAULT_MAX_REPAIRS,
        }
    }

    pub fn with_max_repairs(mut self, max_repairs: u32) -> Self {
        self.max_repairs = max_repairs;
        self
    }

    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    fn max_executions(&self) -> u32 {
        self.max_repairs.saturating_add(1)
    }

    /// Run `initial` and repair it as needed. `intent` and `project_context`
    /// are embedded in every repair prompt.
    pub async fn drive(&self, initial: Artifact, intent: &str, project_context: &str) -> RepairReport {
        let mut attempts: Vec<Attempt> = Vec::new();
        let mut repair_calls = 0u32;
        let mut current = initial;

        loop {
            let attempt = self.execute(attempts.len() as u32, current).await;
            if let NextStep::Finish(outcome) = next_step(&attempt, self.max_repairs) {
                attempts.push(attempt);
                return RepairReport { attempts, outcome, repair_calls };
            }

            repair_calls += 1;
            let candidate = self.request_repair(&attempt, repair_calls, intent, project_context).await;

            if is_unproductive(attempt.artifact.as_str(), &candidate) {
                warn!(attempt = repair_calls, "Repair produced no change, giving up");
                self.events.emit(LoopEvent::RepairUnproductive { attempt: repair_calls });
                attempts.push(attempt);
                return RepairReport {
                    attempts,
                    outcome: RepairOutcome::Exhausted(ExhaustReason::UnproductiveRepair),
                    repair_calls,
                };
            }

            let diff = TextDiff::from_lines(attempt.artifact.as_str(), candidate.as_str())
                .unified_diff()
                .header(&format!("attempt-{}", attempt.index), &format!("attempt-{}", attempt.index + 1))
                .to_string();
            self.audit.record(AuditEvent::RepairDiff { attempt: repair_calls, diff }).await;

            attempts.push(attempt);
            current = Artifact::new(candidate);
        }
    }

    async fn execute(&self, index: u32, artifact: Artifact) -> Attempt {
        self.events.emit(LoopEvent::AttemptStarted {
            index,
            max_executions: self.max_executions(),
        });
        info!(attempt = index + 1, max = self.max_executions(), runner = self.runner.name(), "Executing test");

        let outcome = self.runner.write_and_run(&artifact).await;
        let failure_kind = (!outcome.passed).then(|| classify(&outcome.diagnostic));

        self.audit.record(AuditEvent::Attempt {
            index,
            passed: outcome.passed,
            failure_kind: failure_kind.map(|k| k.to_string()),
            diagnostic: outcome.diagnostic.clone(),
        }).await;

        match failure_kind {
            None => self.events.emit(LoopEvent::AttemptPassed {
                index,
                duration_ms: outcome.duration.as_millis() as u64,
            }),
            Some(kind) => {
                info!(attempt = index + 1, kind = %kind, "Test failed");
                self.events.emit(LoopEvent::AttemptFailed {
                    index,
                    kind,
                    diagnostic: outcome.diagnostic.clone(),
                });
            }
        }

        Attempt {
            index,
            artifact,
            verdict: outcome.passed,
            diagnostic: outcome.diagnostic,
            failure_kind,
        }
    }

    /// Ask the oracle for a corrected artifact. Any failure yields an empty
    /// candidate, which the caller treats as an unproductive repair.
    async fn request_repair(&self, last: &Attempt, repair: u32, intent: &str, project_context: &str) -> String {
        let kind = last.failure_kind.unwrap_or(FailureKind::Unknown);
        self.events.emit(LoopEvent::RepairRequested {
            attempt: repair,
            max_repairs: self.max_repairs,
        });
        info!(attempt = repair, max = self.max_repairs, kind = %kind, "Requesting repair");

        let vars = PromptVariables {
            intent: intent.to_string(),
            project_context: Some(project_context.to_string()),
            artifact: Some(last.artifact.as_str().to_string()),
            failure_kind: Some(kind.to_string()),
            diagnostic: Some(last.diagnostic.clone()),
            guidance: Some(guidance_for(kind).to_string()),
            attempt: Some(repair),
            max_attempts: Some(self.max_repairs),
            ..Default::default()
        };
        let prompt = match self.prompts.render(builtin::REPAIR, &vars) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Repair prompt unavailable");
                return String::new();
            }
        };

        match self.oracle.ask("repair", &prompt).await {
            Ok(response) => extract_code(&response, "solidity"),
            Err(e) => {
                warn!(error = %e, "Repair call failed");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use async_trait::async_trait;
    use crate::errors::GorillaError;
    use crate::llm::{LLMProvider, LLMResponse};
    use crate::runner::ExecutionOutcome;

    /// Replies from a script; an exhausted script is an API error.
    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
        calls: Mutex<u32>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, GorillaError> {
            *self.calls.lock().unwrap() += 1;
            match self.replies.lock().unwrap().pop_front() {
                Some(r) => Ok(LLMResponse::text(r, "scripted")),
                None => Err(GorillaError::LLMApi("script exhausted".into())),
            }
        }
        fn provider_name(&self) -> &str { "scripted" }
        fn model_name(&self) -> &str { "scripted" }
    }

    /// Passes once the artifact contains `pass_marker`.
    struct MarkerRunner {
        pass_marker: &'static str,
        runs: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TestRunner for MarkerRunner {
        async fn prepare(&self) -> Result<(), GorillaError> {
            Ok(())
        }
        async fn write_and_run(&self, artifact: &Artifact) -> ExecutionOutcome {
            self.runs.lock().unwrap().push(artifact.as_str().to_string());
            let passed = artifact.as_str().contains(self.pass_marker);
            ExecutionOutcome {
                passed,
                diagnostic: if passed { "ok".into() } else { "Error: Compilation failed".into() },
                exit_code: Some(if passed { 0 } else { 1 }),
                duration: Duration::from_millis(1),
            }
        }
        fn name(&self) -> &str { "marker" }
    }

    fn driver(provider: Arc<ScriptedProvider>, runner: Arc<MarkerRunner>) -> RepairDriver {
        let audit = Arc::new(AuditTrail::disabled());
        let oracle = Arc::new(Oracle::new(provider, audit.clone()));
        RepairDriver::new(oracle, Arc::new(PromptLoader::builtin_only()), runner, audit)
    }

    fn runner(pass_marker: &'static str) -> Arc<MarkerRunner> {
        Arc::new(MarkerRunner { pass_marker, runs: Mutex::new(Vec::new()) })
    }

    #[tokio::test]
    async fn test_first_pass_needs_no_repair() {
        let provider = Arc::new(ScriptedProvider::new(&[]));
        let runner = runner("PASS");
        let report = driver(provider.clone(), runner.clone())
            .drive(Artifact::new("// PASS"), "intent", "ctx")
            .await;
        assert!(report.passed());
        assert_eq!(report.executions(), 1);
        assert_eq!(report.repair_calls, 0);
        assert_eq!(*provider.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repair_then_pass() {
        let provider = Arc::new(ScriptedProvider::new(&["```solidity\n// v2 PASS\n```"]));
        let runner = runner("PASS");
        let report = driver(provider, runner.clone())
            .drive(Artifact::new("// v1"), "intent", "ctx")
            .await;
        assert!(report.passed());
        assert_eq!(report.repair_calls, 1);
        assert_eq!(*runner.runs.lock().unwrap(), vec!["// v1", "// v2 PASS"]);
        assert_eq!(report.attempts[0].failure_kind, Some(FailureKind::Compilation));
        assert_eq!(report.attempts[1].failure_kind, None);
    }

    #[tokio::test]
    async fn test_budget_bounds_executions() {
        let provider = Arc::new(ScriptedProvider::new(&["// v2", "// v3", "// v4", "// v5"]));
        let runner = runner("PASS");
        let report = driver(provider.clone(), runner.clone())
            .drive(Artifact::new("// v1"), "intent", "ctx")
            .await;
        assert!(!report.passed());
        assert_eq!(report.outcome, RepairOutcome::Exhausted(ExhaustReason::AttemptsExhausted));
        assert_eq!(report.executions(), 4);
        assert_eq!(report.repair_calls, 3);
        assert_eq!(*provider.calls.lock().unwrap(), 3);
        let indices: Vec<u32> = report.attempts.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_identical_repair_short_circuits() {
        let provider = Arc::new(ScriptedProvider::new(&["```solidity\n// v1\n```"]));
        let runner = runner("PASS");
        let report = driver(provider, runner.clone())
            .drive(Artifact::new("// v1\n"), "intent", "ctx")
            .await;
        assert_eq!(report.outcome, RepairOutcome::Exhausted(ExhaustReason::UnproductiveRepair));
        assert_eq!(report.executions(), 1);
        assert_eq!(report.repair_calls, 1);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_unproductive() {
        let provider = Arc::new(ScriptedProvider::new(&[]));
        let report = driver(provider, runner("PASS"))
            .drive(Artifact::new("// v1"), "intent", "ctx")
            .await;
        assert_eq!(report.outcome, RepairOutcome::Exhausted(ExhaustReason::UnproductiveRepair));
        assert_eq!(report.executions(), 1);
    }

    #[tokio::test]
    async fn test_zero_budget_executes_once() {
        let provider = Arc::new(ScriptedProvider::new(&["// v2 PASS"]));
        let report = driver(provider.clone(), runner("PASS"))
            .with_max_repairs(0)
            .drive(Artifact::new("// v1"), "intent", "ctx")
            .await;
        assert_eq!(report.outcome, RepairOutcome::Exhausted(ExhaustReason::AttemptsExhausted));
        assert_eq!(report.executions(), 1);
        assert_eq!(*provider.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unbounded_budget_does_not_overflow() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let provider = Arc::new(ScriptedProvider::new(&[]));
        let report = driver(provider, runner("PASS"))
            .with_max_repairs(u32::MAX)
            .with_events(EventSink::new(tx))
            .drive(Artifact::new("// PASS"), "intent", "ctx")
            .await;
        assert!(report.passed());
        assert_eq!(report.executions(), 1);
        match rx.recv().await {
            Some(LoopEvent::AttemptStarted { index: 0, max_executions }) => assert_eq!(max_executions, u32::MAX),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
