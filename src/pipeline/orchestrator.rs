use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use crate::audit::{AuditEvent, AuditTrail};
use crate::errors::{GorillaError, RetryConfig};
use crate::generation::Generator;
use crate::llm::{LLMProvider, Oracle};
use crate::prompts::PromptLoader;
use crate::repair::{project_context, RepairDriver};
use crate::runner::{ForgeRunner, TestRunner};
use crate::template::{read_base_template, render_artifact};
use super::config::PipelineConfig;
use super::preconditions::check_environment;
use super::events::{EventSink, LoopEvent};
use super::summary::{RunStatus, RunSummary};
use tracing::{info, warn};

/// Placeholder handed to the oracle when the target contract is missing.
pub const MISSING_CONTRACT_SOURCE: &str = "// Contract file does not exist";

/// Builds the runner for a given project root.
pub type RunnerFactory = Arc<dyn Fn(&Path) -> Arc<dyn TestRunner> + Send + Sync>;

/// Top-level entry: one intent in, one boolean out. The oracle provider and
/// runner are injected so either can be replaced.
pub struct TestPipeline {
    config: PipelineConfig,
    provider: Arc<dyn LLMProvider>,
    runner_factory: RunnerFactory,
    prompts: Arc<PromptLoader>,
    events: EventSink,
}

impl TestPipeline {
    /// Pipeline that runs artifacts with `forge` as configured.
    pub fn new(config: PipelineConfig, provider: Arc<dyn LLMProvider>) -> Self {
        let settings = config.runner.clone();
        let runner_factory: RunnerFactory = Arc::new(move |project: &Path| {
            Arc::new(ForgeRunner::new(project, settings.clone())) as Arc<dyn TestRunner>
        });
        let prompts = Arc::new(PromptLoader::new(config.prompts_dir.clone()));
        Self {
            config,
            provider,
            runner_factory,
            prompts,
            events: EventSink::default(),
        }
    }

    pub fn with_runner_factory(mut self, factory: RunnerFactory) -> Self {
        self.runner_factory = factory;
        self
    }

    /// Use one runner for every project.
    pub fn with_runner(self, runner: Arc<dyn TestRunner>) -> Self {
        self.with_runner_factory(Arc::new(move |_: &Path| runner.clone()))
    }

    /// Attach an event channel for live progress display.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<LoopEvent>) -> Self {
        self.events = EventSink::new(tx);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate, execute and repair a test for `intent` against the project.
    /// Never errors: every failure mode ends in `false`.
    pub async fn run_test(&self, project: &Path, intent: &str) -> bool {
        self.run(project, intent).await.passed()
    }

    pub async fn run(&self, project: &Path, intent: &str) -> RunSummary {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(run_id = %run_id, project = %project.display(), intent = %intent, "Starting test run");
        self.events.emit(LoopEvent::RunStarted {
            run_id: run_id.clone(),
            project: project.display().to_string(),
            intent: intent.to_string(),
        });

        let runner = match self.check_preconditions(project).await {
            Ok(r) => r,
            Err(e) => {
                let reason = e.to_string();
                warn!(reason = %reason, "Precondition failed, aborting run");
                self.events.emit(LoopEvent::PreconditionFailed { reason: reason.clone() });
                return RunSummary::aborted(run_id, RunStatus::PreconditionFailed(reason), start.elapsed());
            }
        };

        let audit = Arc::new(self.open_audit(project, &run_id).await);
        audit.record(AuditEvent::RunStarted {
            project: project.display().to_string(),
            intent: intent.to_string(),
        }).await;

        let summary = self.generate_and_repair(project, intent, run_id, runner, audit.clone(), start).await;

        audit.record(AuditEvent::RunFinished {
            outcome: summary.outcome_label().to_string(),
            executions: summary.executions(),
            repair_calls: summary.repair_calls,
        }).await;
        info!(
            outcome = summary.outcome_label(),
            executions = summary.executions(),
            repair_calls = summary.repair_calls,
            duration_ms = summary.duration.as_millis() as u64,
            "Test run finished"
        );
        self.events.emit(LoopEvent::RunFinished {
            passed: summary.passed(),
            outcome: summary.outcome_label().to_string(),
            executions: summary.executions(),
            repair_calls: summary.repair_calls,
            duration_ms: summary.duration.as_millis() as u64,
        });
        summary
    }

    async fn generate_and_repair(
        &self,
        project: &Path,
        intent: &str,
        run_id: String,
        runner: Arc<dyn TestRunner>,
        audit: Arc<AuditTrail>,
        start: Instant,
    ) -> RunSummary {
        let audit_path = audit.path().map(Path::to_path_buf);
        let oracle = Arc::new(
            Oracle::new(self.provider.clone(), audit.clone())
                .with_retry(RetryConfig { max_retries: self.config.oracle_retries })
                .with_timeout(self.config.oracle_timeout),
        );

        let contract_source = self.read_contract(project).await;
        let contract_text = contract_source.as_deref().unwrap_or(MISSING_CONTRACT_SOURCE);

        let generator = Generator::new(oracle.clone(), self.prompts.clone(), audit.clone());
        let generation = generator.generate(intent, contract_text).await;
        self.events.emit(LoopEvent::ModeSelected {
            mode: generation.plan.mode,
            category: generation.plan.category,
        });
        if let Some(bundle) = &generation.bundle {
            self.events.emit(LoopEvent::SpecsGenerated { summary: bundle.summary() });
        }

        let template_path = project.join(&self.config.base_template_path);
        let rendered = read_base_template(&template_path).and_then(|source| {
            render_artifact(
                &source,
                &generation.variables,
                &self.config.template_contract,
                &self.config.runner.suite_contract,
            )
        });
        let artifact = match rendered {
            Ok(a) => a,
            Err(e) => {
                warn!(error = %e, "Could not render test artifact");
                let mut summary = RunSummary::aborted(run_id, RunStatus::RenderFailed(e.to_string()), start.elapsed());
                summary.mode = Some(generation.plan.mode);
                summary.category = generation.plan.category;
                summary.audit_path = audit_path;
                return summary;
            }
        };

        let context = project_context(
            &self.config.contract_name(),
            contract_source.as_deref(),
            &self.config.base_template_name(),
            template_path.exists(),
        );

        let driver = RepairDriver::new(oracle, self.prompts.clone(), runner, audit)
            .with_max_repairs(self.config.max_repairs)
            .with_events(self.events.clone());
        let report = driver.drive(artifact, intent, &context).await;

        RunSummary {
            run_id,
            status: RunStatus::Completed(report.outcome),
            mode: Some(generation.plan.mode),
            category: generation.plan.category,
            attempts: report.attempts,
            repair_calls: report.repair_calls,
            duration: start.elapsed(),
            audit_path,
        }
    }

    async fn check_preconditions(&self, project: &Path) -> Result<Arc<dyn TestRunner>, GorillaError> {
        let runner = (self.runner_factory)(project);
        check_environment(project, &self.config.base_template_path, runner.as_ref()).await?;
        Ok(runner)
    }

    async fn read_contract(&self, project: &Path) -> Option<String> {
        let path = project.join(&self.config.contract_path);
        match tokio::fs::read_to_string(&path).await {
            Ok(source) => Some(source),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Contract source unavailable");
                None
            }
        }
    }

    async fn open_audit(&self, project: &Path, run_id: &str) -> AuditTrail {
        if !self.config.audit_enabled {
            return AuditTrail::disabled();
        }
        let dir = project.join(&self.config.audit_dir);
        match AuditTrail::open(&dir, run_id).await {
            Ok(trail) => trail,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Audit trail unavailable, continuing without it");
                AuditTrail::disabled()
            }
        }
    }
}
