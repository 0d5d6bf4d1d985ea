/// Functions whose presence is worth telling the repair oracle about.
const NOTABLE_FUNCTIONS: &[&str] = &["transfer", "transferFrom", "approve", "mint", "burn"];

/// Short description of the target project for repair prompts: the
/// contract's constructor signature, which common token functions it has,
/// and whether the base template is in place.
pub fn project_context(
    contract_name: &str,
    contract_source: Option<&str>,
    template_name: &str,
    template_exists: bool,
) -> String {
    let mut lines = Vec::new();

    match contract_source {
        Some(source) => {
            if let Some(signature) = constructor_signature(source) {
                lines.push(format!("{} constructor: {}", contract_name, signature));
            }
            for func in NOTABLE_FUNCTIONS {
                if source.contains(&format!("function {}(", func)) {
                    lines.push(format!("- Contains {} function", func));
                }
            }
        }
        None => lines.push(format!("{} contract file does not exist", contract_name)),
    }

    let state = if template_exists { "exists" } else { "does not exist" };
    lines.push(format!("Base test template: {} {}", template_name, state));

    lines.join("\n")
}

/// `constructor(` up to and including the first closing parenthesis.
fn constructor_signature(source: &str) -> Option<&str> {
    let start = source.find("constructor(")?;
    let end = source[start..].find(')')? + start + 1;
    Some(&source[start..end])
}
