use std::path::PathBuf;
use console::style;
use crate::cli::commands::InitTemplateArgs;
use crate::errors::GorillaError;
use crate::pipeline::PipelineConfig;
use crate::template::CANONICAL_BASE_TEMPLATE;
use crate::utils::fs::atomic_write;

pub async fn handle_init_template(args: InitTemplateArgs) -> Result<(), GorillaError> {
    let file_config = super::load_config(args.config.as_deref()).await?;
    let config = PipelineConfig::from_config(&file_config);
    let project = PathBuf::from(&args.project);
    if !project.is_dir() {
        return Err(GorillaError::Precondition(format!(
            "Project path does not exist: {}",
            project.display()
        )));
    }

    let path = project.join(&config.base_template_path);
    if path.exists() && !args.force {
        println!(
            "{} Base template already present: {} (use --force to overwrite)",
            style("•").dim(),
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    atomic_write(&path, CANONICAL_BASE_TEMPLATE).await?;
    println!("{} Wrote base template: {}", style("✓").green(), path.display());
    Ok(())
}
