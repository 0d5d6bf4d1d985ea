use serde::Serialize;
use super::attempt::Attempt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustReason {
    /// Every allowed repair was used and the last run still failed.
    AttemptsExhausted,
    /// The oracle returned nothing, or the same artifact again.
    UnproductiveRepair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RepairOutcome {
    Success,
    Exhausted(ExhaustReason),
}

impl RepairOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Exhausted(ExhaustReason::AttemptsExhausted) => "attempts_exhausted",
            Self::Exhausted(ExhaustReason::UnproductiveRepair) => "unproductive_repair",
        }
    }
}

impl std::fmt::Display for RepairOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Finish(RepairOutcome),
    Repair,
}

/// What to do after `last` has been executed, given the repair budget.
pub fn next_step(last: &Attempt, max_repairs: u32) -> NextStep {
    if last.verdict {
        NextStep::Finish(RepairOutcome::Success)
    } else if last.index >= max_repairs {
        NextStep::Finish(RepairOutcome::Exhausted(ExhaustReason::AttemptsExhausted))
    } else {
        NextStep::Repair
    }
}

/// A repair candidate is useless when it is empty or the same text as the
/// artifact it was meant to fix. Surrounding whitespace is ignored.
pub fn is_unproductive(current: &str, candidate: &str) -> bool {
    let candidate = candidate.trim();
    candidate.is_empty() || candidate == current.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Artifact;

    fn attempt(index: u32, verdict: bool) -> Attempt {
        Attempt {
            index,
            artifact: Artifact::new("contract GorillaTest {}"),
            verdict,
            diagnostic: String::new(),
            failure_kind: None,
        }
    }

    #[test]
    fn test_pass_finishes_successfully() {
        assert_eq!(next_step(&attempt(0, true), 3), NextStep::Finish(RepairOutcome::Success));
        assert_eq!(next_step(&attempt(3, true), 3), NextStep::Finish(RepairOutcome::Success));
    }

    #[test]
    fn test_failure_with_budget_repairs() {
        for index in 0..3 {
            assert_eq!(next_step(&attempt(index, false), 3), NextStep::Repair);
        }
    }

    #[test]
    fn test_failure_at_budget_exhausts() {
        assert_eq!(
            next_step(&attempt(3, false), 3),
            NextStep::Finish(RepairOutcome::Exhausted(ExhaustReason::AttemptsExhausted))
        );
        assert_eq!(
            next_step(&attempt(0, false), 0),
            NextStep::Finish(RepairOutcome::Exhausted(ExhaustReason::AttemptsExhausted))
        );
    }

    #[test]
    fn test_unproductive_candidates() {
        let current = "contract A {}\n";
        assert!(is_unproductive(current, ""));
        assert!(is_unproductive(current, "   \n"));
        assert!(is_unproductive(current, "contract A {}"));
        assert!(!is_unproductive(current, "contract A { uint x; }"));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(RepairOutcome::Success.to_string(), "success");
        assert_eq!(
            RepairOutcome::Exhausted(ExhaustReason::UnproductiveRepair).to_string(),
            "unproductive_repair"
        );
    }
}
