use std::sync::Arc;
use crate::audit::{AuditEvent, AuditTrail};
use crate::intent::{classify_category, classify_mode, OperatingMode, VulnerabilityCategory, DEFAULT_CATEGORY};
use crate::llm::Oracle;
use crate::prompts::PromptLoader;
use crate::template::TemplateVariables;
use super::bundle::FormalSpecBundle;
use super::exploit::generate_exploit_variables;
use super::spec_violation::{generate_formal_specs, generate_violation_test_logic};
use tracing::info;

/// Mode and category chosen for a request before any oracle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    pub mode: OperatingMode,
    pub category: Option<VulnerabilityCategory>,
}

impl GenerationPlan {
    pub fn for_intent(intent: &str) -> Self {
        let mode = classify_mode(intent);
        let category = match mode {
            OperatingMode::SpecViolation => Some(classify_category(intent)),
            OperatingMode::Exploit => None,
        };
        Self { mode, category }
    }
}

/// Result of initial generation: the placeholder bindings plus, in
/// spec-violation mode, the bundle they were derived from.
#[derive(Debug, Clone)]
pub struct Generation {
    pub plan: GenerationPlan,
    pub variables: TemplateVariables,
    pub bundle: Option<FormalSpecBundle>,
}

/// Turns a request into initial template variables. Never fails: oracle
/// problems degrade into default fragments.
pub struct Generator {
    oracle: Arc<Oracle>,
    prompts: Arc<PromptLoader>,
    audit: Arc<AuditTrail>,
}

impl Generator {
    pub fn new(oracle: Arc<Oracle>, prompts: Arc<PromptLoader>, audit: Arc<AuditTrail>) -> Self {
        Self { oracle, prompts, audit }
    }

    pub async fn generate(&self, intent: &str, contract_source: &str) -> Generation {
        let plan = GenerationPlan::for_intent(intent);
        info!(mode = %plan.mode, category = ?plan.category, "Operating mode selected");
        self.audit.record(AuditEvent::ModeSelected {
            mode: plan.mode.to_string(),
            category: plan.category.map(|c| c.to_string()),
        }).await;

        match plan.mode {
            OperatingMode::Exploit => {
                let variables =
                    generate_exploit_variables(&self.oracle, &self.prompts, contract_source, intent).await;
                Generation { plan, variables, bundle: None }
            }
            OperatingMode::SpecViolation => {
                let category = plan.category.unwrap_or(DEFAULT_CATEGORY);
                let bundle =
                    generate_formal_specs(&self.oracle, &self.prompts, contract_source, category).await;
                let logic = generate_violation_test_logic(
                    &self.oracle,
                    &self.prompts,
                    contract_source,
                    intent,
                    &bundle,
                )
                .await;
                Generation {
                    plan,
                    variables: logic.into_variables(),
                    bundle: Some(bundle),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_exploit_has_no_category() {
        let plan = GenerationPlan::for_intent("steal tokens via mint");
        assert_eq!(plan.mode, OperatingMode::Exploit);
        assert_eq!(plan.category, None);
    }

    #[test]
    fn test_plan_spec_violation_classifies_category() {
        let plan = GenerationPlan::for_intent("check the allowance invariant");
        assert_eq!(plan.mode, OperatingMode::SpecViolation);
        assert_eq!(plan.category, Some(VulnerabilityCategory::AllowanceBypass));
    }
}
