use crate::llm::Oracle;
use crate::parser::parse_labeled_fields;
use crate::prompts::{builtin, PromptLoader, PromptVariables};
use crate::template::{TemplateVariables, TEST_LOGIC, VULNERABILITY_ASSERTIONS};
use tracing::warn;

/// Single oracle call producing the exploit body. Any failure falls back to
/// the default placeholder variables so the loop still gets a build-and-run
/// cycle out of it.
pub async fn generate_exploit_variables(
    oracle: &Oracle,
    prompts: &PromptLoader,
    contract_source: &str,
    intent: &str,
) -> TemplateVariables {
    let vars = PromptVariables {
        contract_source: contract_source.to_string(),
        intent: intent.to_string(),
        test_fixtures: Some(builtin::TEST_FIXTURES.to_string()),
        ..Default::default()
    };
    let prompt = match prompts.render(builtin::EXPLOIT_TEST, &vars) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Exploit prompt unavailable, using default template variables");
            return TemplateVariables::default();
        }
    };

    match oracle.ask("exploit-test", &prompt).await {
        Ok(response) => parse_exploit_response(&response),
        Err(e) => {
            warn!(error = %e, "Exploit generation failed, using default template variables");
            TemplateVariables::default()
        }
    }
}

pub fn parse_exploit_response(response: &str) -> TemplateVariables {
    let defaults = TemplateVariables::default();
    let mut fields = parse_labeled_fields(
        response,
        &[
            (TEST_LOGIC, defaults.test_logic()),
            (VULNERABILITY_ASSERTIONS, defaults.vulnerability_assertions()),
        ],
    );
    TemplateVariables::new(fields.take(TEST_LOGIC), fields.take(VULNERABILITY_ASSERTIONS))
}
