use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Compilation,
    Runtime,
    Assertion,
    Dependency,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compilation => "compilation_error",
            Self::Runtime => "runtime_error",
            Self::Assertion => "assertion_error",
            Self::Dependency => "dependency_error",
            Self::Unknown => "unknown_error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers per kind, checked in this order. First hit wins.
const MARKERS: &[(FailureKind, &[&str])] = &[
    (FailureKind::Compilation, &["compilation failed", "solc"]),
    (FailureKind::Runtime, &["revert", "panic"]),
    (FailureKind::Assertion, &["assertion failed", "assert"]),
    (FailureKind::Dependency, &["not found", "missing"]),
];

pub fn classify(diagnostic: &str) -> FailureKind {
    let lower = diagnostic.to_lowercase();
    MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lower.contains(m)))
        .map(|(kind, _)| *kind)
        .unwrap_or(FailureKind::Unknown)
}
