use std::path::Path;
use crate::errors::GorillaError;
use crate::runner::TestRunner;

/// Environment readiness, checked in order: project directory, runner
/// (installed, project initialised), base template. The first failure is
/// returned and nothing else is attempted.
pub async fn check_environment(
    project: &Path,
    base_template: &Path,
    runner: &dyn TestRunner,
) -> Result<(), GorillaError> {
    if !project.is_dir() {
        return Err(GorillaError::Precondition(format!(
            "Project path does not exist: {}",
            project.display()
        )));
    }

    runner.prepare().await?;

    let template_path = project.join(base_template);
    if !template_path.is_file() {
        return Err(GorillaError::Precondition(format!(
            "Base template file not found: {}",
            template_path.display()
        )));
    }

    Ok(())
}
