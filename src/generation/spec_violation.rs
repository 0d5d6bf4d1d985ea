use crate::intent::VulnerabilityCategory;
use crate::llm::Oracle;
use crate::parser::parse_labeled_fields;
use crate::prompts::{builtin, PromptLoader, PromptVariables};
use crate::template::TemplateVariables;
use super::bundle::FormalSpecBundle;
use tracing::{info, warn};

const TEST_LOGIC_LABEL: &str = "testLogic";
const SPEC_CHECKS_LABEL: &str = "specViolationChecks";
const ATTACK_VERIFICATION_LABEL: &str = "attackVerification";

/// Fragments produced by the second spec-violation oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationLogic {
    pub test_logic: String,
    pub spec_checks: String,
    pub attack_verification: String,
}

impl ViolationLogic {
    /// Per-field defaults when the response omits a label.
    fn unlabeled() -> Self {
        Self {
            test_logic: "// Default test logic".to_string(),
            spec_checks: "// Default spec checks".to_string(),
            attack_verification: "// Default attack verification".to_string(),
        }
    }

    /// Value used when the oracle call itself fails.
    pub fn failed() -> Self {
        Self {
            test_logic: "// Failed to generate test logic".to_string(),
            spec_checks: "// Failed to generate spec checks".to_string(),
            attack_verification: "// Failed to generate attack verification".to_string(),
        }
    }

    pub fn parse(response: &str) -> Self {
        let defaults = Self::unlabeled();
        let mut fields = parse_labeled_fields(
            response,
            &[
                (TEST_LOGIC_LABEL, defaults.test_logic.as_str()),
                (SPEC_CHECKS_LABEL, defaults.spec_checks.as_str()),
                (ATTACK_VERIFICATION_LABEL, defaults.attack_verification.as_str()),
            ],
        );
        Self {
            test_logic: fields.take(TEST_LOGIC_LABEL),
            spec_checks: fields.take(SPEC_CHECKS_LABEL),
            attack_verification: fields.take(ATTACK_VERIFICATION_LABEL),
        }
    }

    /// Assertions are the spec checks followed by the attack verification,
    /// joined with "; ".
    pub fn into_variables(self) -> TemplateVariables {
        let assertions = format!("{}; {}", self.spec_checks, self.attack_verification);
        TemplateVariables::new(self.test_logic, assertions)
    }
}

pub async fn generate_formal_specs(
    oracle: &Oracle,
    prompts: &PromptLoader,
    contract_source: &str,
    category: VulnerabilityCategory,
) -> FormalSpecBundle {
    let vars = PromptVariables {
        contract_source: contract_source.to_string(),
        focus: Some(format!("{} ({})", category, category.focus_description())),
        ..Default::default()
    };
    let prompt = match prompts.render(builtin::FORMAL_SPECS, &vars) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Formal spec prompt unavailable, using default specifications");
            return FormalSpecBundle::default();
        }
    };

    let bundle = match oracle.ask("formal-specs", &prompt).await {
        Ok(response) => FormalSpecBundle::parse(&response),
        Err(e) => {
            warn!(error = %e, "Specification generation failed, using default specifications");
            FormalSpecBundle::default()
        }
    };
    info!(category = %category, bundle = %bundle.summary(), "Formal specifications ready");
    bundle
}

pub async fn generate_violation_test_logic(
    oracle: &Oracle,
    prompts: &PromptLoader,
    contract_source: &str,
    intent: &str,
    bundle: &FormalSpecBundle,
) -> ViolationLogic {
    let vars = PromptVariables {
        contract_source: contract_source.to_string(),
        intent: intent.to_string(),
        spec_bundle: Some(bundle.to_prompt_json()),
        test_fixtures: Some(builtin::TEST_FIXTURES.to_string()),
        ..Default::default()
    };
    let prompt = match prompts.render(builtin::VIOLATION_TEST, &vars) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Violation test prompt unavailable");
            return ViolationLogic::failed();
        }
    };

    match oracle.ask("violation-test", &prompt).await {
        Ok(response) => ViolationLogic::parse(&response),
        Err(e) => {
            warn!(error = %e, "Test logic generation failed");
            ViolationLogic::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{TEST_LOGIC, VULNERABILITY_ASSERTIONS};

    #[test]
    fn test_parse_all_labels() {
        let response = "Analysis first.\ntestLogic: vm.prank(attacker); token.mint(attacker, 5);\nspecViolationChecks: assertTrue(token.totalSupply() > supplyBefore, \"supply invariant\")\nattackVerification: assertEq(token.balanceOf(attacker), attackerBalanceBefore + 5)\n";
        let logic = ViolationLogic::parse(response);
        assert_eq!(logic.test_logic, "vm.prank(attacker); token.mint(attacker, 5);");
        assert_eq!(logic.spec_checks, "assertTrue(token.totalSupply() > supplyBefore, \"supply invariant\")");
        assert_eq!(logic.attack_verification, "assertEq(token.balanceOf(attacker), attackerBalanceBefore + 5)");
    }

    #[test]
    fn test_parse_missing_labels_keeps_defaults() {
        let logic = ViolationLogic::parse("testLogic: a();");
        assert_eq!(logic.test_logic, "a();");
        assert_eq!(logic.spec_checks, "// Default spec checks");
        assert_eq!(logic.attack_verification, "// Default attack verification");
        assert_eq!(ViolationLogic::parse(""), ViolationLogic::unlabeled());
    }

    #[test]
    fn test_into_variables_joins_assertions() {
        let logic = ViolationLogic {
            test_logic: "t();".into(),
            spec_checks: "assertTrue(a)".into(),
            attack_verification: "assertTrue(b)".into(),
        };
        let vars = logic.into_variables();
        assert_eq!(vars.get(TEST_LOGIC), Some("t();"));
        assert_eq!(vars.get(VULNERABILITY_ASSERTIONS), Some("assertTrue(a); assertTrue(b)"));
    }
}
