use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use console::style;
use tokio::sync::mpsc;
use crate::cli::commands::RunArgs;
use crate::config::{resolve_api_key, resolve_credential, validate_max_repairs, GorillaConfig};
use crate::errors::GorillaError;
use crate::llm::{self, LLMProvider};
use crate::llm::router::{api_key_env_var, DEFAULT_PROVIDER};
use crate::pipeline::{PipelineConfig, RunStatus, TestPipeline};
use crate::repair::RepairOutcome;
use super::renderer::render_event;
use tracing::info;

pub async fn handle_run(args: RunArgs, quiet: bool) -> Result<(), GorillaError> {
    let file_config = super::load_config(args.config.as_deref()).await?;
    let config = build_pipeline_config(&args, &file_config)?;
    let provider = build_provider(&args, &file_config)?;
    info!(
        oracle = %provider.label(),
        project = %args.project,
        "Starting gorilla run"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !quiet {
                println!("{}", render_event(&event));
            }
        }
    });

    let pipeline = TestPipeline::new(config, provider).with_event_channel(tx);
    let summary = pipeline.run(&PathBuf::from(&args.project), &args.intent).await;
    drop(pipeline);
    let _ = printer.await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if let Some(path) = &summary.audit_path {
        println!("  {} {}", style("audit:").dim(), path.display());
    }

    match summary.status {
        RunStatus::Completed(RepairOutcome::Success) => Ok(()),
        RunStatus::Completed(outcome) => Err(GorillaError::TestFailed(outcome.to_string())),
        RunStatus::PreconditionFailed(reason) => Err(GorillaError::Precondition(reason)),
        RunStatus::RenderFailed(reason) => Err(GorillaError::Template(reason)),
    }
}

/// Config file values, then command-line overrides on top.
fn build_pipeline_config(args: &RunArgs, file_config: &GorillaConfig) -> Result<PipelineConfig, GorillaError> {
    let mut config = PipelineConfig::from_config(file_config);
    if let Some(max) = args.max_repairs {
        validate_max_repairs("--max-repairs", max)?;
        config.max_repairs = max;
    }
    if let Some(secs) = args.oracle_timeout {
        if secs == 0 {
            return Err(GorillaError::Config("--oracle-timeout must be positive".into()));
        }
        config.oracle_timeout = Some(Duration::from_secs(secs));
    }
    if args.no_audit {
        config.audit_enabled = false;
    }
    Ok(config)
}

fn build_provider(args: &RunArgs, file_config: &GorillaConfig) -> Result<Arc<dyn LLMProvider>, GorillaError> {
    let llm_config = file_config.llm.clone().unwrap_or_default();
    let provider_name = args
        .provider
        .clone()
        .or(llm_config.provider)
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
    let model = args.model.clone().or(llm_config.model);
    let base_url = args
        .base_url
        .clone()
        .or(llm_config.base_url.as_deref().map(resolve_credential));

    let api_key = resolve_api_key(
        args.api_key.as_deref(),
        llm_config.api_key.as_deref(),
        api_key_env_var(&provider_name),
    )
    .unwrap_or_default();

    let provider = llm::create_provider(&provider_name, &api_key, model.as_deref(), base_url.as_deref())?;
    Ok(Arc::from(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::cli::commands::{Cli, Commands};
    use crate::config::MAX_REPAIRS_LIMIT;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["gorilla", "run", "proj", "check minting"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_max_repairs_flag_overrides_config() {
        let config = build_pipeline_config(&run_args(&["--max-repairs", "5"]), &GorillaConfig::default()).unwrap();
        assert_eq!(config.max_repairs, 5);
    }

    #[test]
    fn test_max_repairs_flag_is_bounded() {
        let limit = MAX_REPAIRS_LIMIT.to_string();
        assert!(build_pipeline_config(&run_args(&["--max-repairs", &limit]), &GorillaConfig::default()).is_ok());

        let huge = u32::MAX.to_string();
        let err = build_pipeline_config(&run_args(&["--max-repairs", &huge]), &GorillaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GorillaError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_zero_oracle_timeout_rejected() {
        let err = build_pipeline_config(&run_args(&["--oracle-timeout", "0"]), &GorillaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GorillaError::Config(_)));
    }
}
