use console::style;
use crate::pipeline::LoopEvent;
use crate::utils::formatting::{format_duration, indent};
use crate::utils::truncation::truncate_output;

/// Render a loop event as styled terminal output.
pub fn render_event(event: &LoopEvent) -> String {
    match event {
        LoopEvent::RunStarted { run_id, project, intent } => {
            format!(
                "\n{} Run {} on {}\n  {} {}",
                style("▶").green().bold(),
                style(short_id(run_id)).cyan(),
                style(project).white().bold(),
                style("intent:").dim(),
                intent,
            )
        }
        LoopEvent::PreconditionFailed { reason } => {
            format!("  {} {}", style("✗").red(), style(reason).red())
        }
        LoopEvent::ModeSelected { mode, category } => match category {
            Some(c) => format!("  {} mode {} ({})", style("•").cyan(), style(mode).cyan().bold(), c),
            None => format!("  {} mode {}", style("•").cyan(), style(mode).cyan().bold()),
        },
        LoopEvent::SpecsGenerated { summary } => {
            format!("  {} specifications: {}", style("•").cyan(), summary)
        }
        LoopEvent::AttemptStarted { index, max_executions } => {
            format!(
                "\n{} Execution {}/{}",
                style("---").cyan().bold(),
                index + 1,
                max_executions,
            )
        }
        LoopEvent::AttemptPassed { index, duration_ms } => {
            format!(
                "  {} Execution {} passed {}",
                style("✓").green(),
                index + 1,
                style(format!("({})", format_duration(*duration_ms))).dim(),
            )
        }
        LoopEvent::AttemptFailed { index, kind, diagnostic } => {
            format!(
                "  {} Execution {} failed: {}\n{}",
                style("✗").red(),
                index + 1,
                style(kind).yellow(),
                style(indent(&truncate_output(diagnostic), "    ")).dim(),
            )
        }
        LoopEvent::RepairRequested { attempt, max_repairs } => {
            format!("  {} Requesting repair {}/{}", style("⏳").yellow(), attempt, max_repairs)
        }
        LoopEvent::RepairUnproductive { attempt } => {
            format!(
                "  {} Repair {} returned no usable change, stopping",
                style("✗").red(),
                attempt,
            )
        }
        LoopEvent::RunFinished { passed, outcome, executions, repair_calls, duration_ms } => {
            let mark = if *passed { style("✓").green().bold() } else { style("✗").red().bold() };
            format!(
                "\n{} {} after {} execution(s), {} repair(s) in {}",
                mark,
                if *passed { style(outcome.as_str()).green() } else { style(outcome.as_str()).red() },
                executions,
                repair_calls,
                format_duration(*duration_ms),
            )
        }
    }
}

fn short_id(run_id: &str) -> &str {
    run_id.get(..8).unwrap_or(run_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::FailureKind;

    #[test]
    fn test_attempt_numbers_are_one_based() {
        console::set_colors_enabled(false);
        let line = render_event(&LoopEvent::AttemptStarted { index: 0, max_executions: 4 });
        assert!(line.contains("Execution 1/4"));
    }

    #[test]
    fn test_failure_includes_kind_and_diagnostic() {
        console::set_colors_enabled(false);
        let line = render_event(&LoopEvent::AttemptFailed {
            index: 2,
            kind: FailureKind::Compilation,
            diagnostic: "Error: Compilation failed".into(),
        });
        assert!(line.contains("Execution 3 failed: compilation_error"));
        assert!(line.contains("    Error: Compilation failed"));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("1234567890abcdef"), "12345678");
        assert_eq!(short_id("abc"), "abc");
    }
}
