use std::path::PathBuf;
use console::style;
use crate::cli::commands::ValidateArgs;
use crate::config;
use crate::errors::GorillaError;
use crate::pipeline::PipelineConfig;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), GorillaError> {
    let path = PathBuf::from(&args.config);
    let file_config = config::parse_config(&path).await?;
    let resolved = PipelineConfig::from_config(&file_config);

    println!("{} Configuration is valid: {}", style("✓").green(), args.config);
    println!("  contract:       {}", resolved.contract_path.display());
    println!("  base template:  {}", resolved.base_template_path.display());
    println!("  artifact:       {}", resolved.runner.artifact_path.display());
    println!("  runner:         {} (timeout {}s)", resolved.runner.binary, resolved.runner.timeout.as_secs());
    println!("  max repairs:    {}", resolved.max_repairs);
    match resolved.oracle_timeout {
        Some(t) => println!("  oracle timeout: {}s", t.as_secs()),
        None => println!("  oracle timeout: none"),
    }
    Ok(())
}
