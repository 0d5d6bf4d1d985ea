use std::sync::LazyLock;
use regex::Regex;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\x1B[@-_]|[\x{80}-\x{9F}])[0-?]*[ -/]*[@-~]").expect("valid ANSI regex")
});

/// Remove terminal control sequences so substring matching sees plain text.
pub fn strip_ansi(input: &str) -> String {
    ANSI_RE.replace_all(input, "").into_owned()
}

/// A run passes only when the process exited 0 and stdout carries no
/// failure marker. Runners can report failed tests inside a zero exit.
pub fn verdict(exit_code: Option<i32>, stdout: &str, failure_marker: &str) -> bool {
    exit_code == Some(0) && !stdout.contains(failure_marker)
}

pub fn format_diagnostic(stdout: &str, stderr: &str) -> String {
    format!("STDOUT:\n{}\n\nSTDERR:\n{}", stdout, stderr)
}
