use std::path::PathBuf;
use console::style;
use crate::cli::commands::CheckArgs;
use crate::errors::GorillaError;
use crate::pipeline::{check_environment, PipelineConfig};
use crate::runner::ForgeRunner;
use tracing::info;

pub async fn handle_check(args: CheckArgs) -> Result<(), GorillaError> {
    let file_config = super::load_config(args.config.as_deref()).await?;
    let config = PipelineConfig::from_config(&file_config);
    let project = PathBuf::from(&args.project);

    let runner = ForgeRunner::new(&project, config.runner.clone());
    check_environment(&project, &config.base_template_path, &runner).await?;

    info!(project = %project.display(), "Environment ready");
    println!(
        "{} {} is ready ({} found, base template {})",
        style("✓").green(),
        style(project.display()).white().bold(),
        config.runner.binary,
        config.base_template_path.display(),
    );
    Ok(())
}
