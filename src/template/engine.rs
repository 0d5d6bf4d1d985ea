use std::path::Path;
use std::sync::LazyLock;
use regex::{Captures, Regex};
use crate::errors::GorillaError;
use super::artifact::Artifact;
use super::variables::TemplateVariables;

/// Base skeleton written by `gorilla init-template`. Carries exactly the two
/// placeholders the generators fill.
pub const CANONICAL_BASE_TEMPLATE: &str = include_str!("../../templates/GorillaBase.t.sol");

/// `//$//$` escape, `//${name}`, `//$name`, or a bare `//$` that is invalid.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//\$(?:(?P<escaped>//\$)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|(?P<invalid>))")
        .expect("placeholder pattern is valid")
});

pub fn read_base_template(path: &Path) -> Result<String, GorillaError> {
    if !path.exists() {
        return Err(GorillaError::Precondition(format!(
            "Base template file not found: {}",
            path.display()
        )));
    }
    std::fs::read_to_string(path).map_err(|e| {
        GorillaError::Precondition(format!("Failed to read base template {}: {}", path.display(), e))
    })
}

/// Substitute every placeholder marker in `source`.
///
/// Any marker without a binding is an error; a half-rendered artifact would
/// only fail later in the runner with a less useful message.
pub fn render(source: &str, variables: &TemplateVariables) -> Result<String, GorillaError> {
    let mut missing: Option<String> = None;

    let rendered = PLACEHOLDER_RE.replace_all(source, |caps: &Captures| {
        if caps.name("escaped").is_some() {
            return "//$".to_string();
        }
        let name = caps.name("braced").or_else(|| caps.name("named"));
        match name {
            Some(m) => match variables.get(m.as_str()) {
                Some(value) => value.to_string(),
                None => {
                    missing.get_or_insert_with(|| format!("No binding for template variable '{}'", m.as_str()));
                    caps[0].to_string()
                }
            },
            None => {
                let line = source[..caps.get(0).map_or(0, |m| m.start())].matches('\n').count() + 1;
                missing.get_or_insert_with(|| format!("Invalid placeholder marker on line {}", line));
                caps[0].to_string()
            }
        }
    });

    match missing {
        Some(reason) => Err(GorillaError::Template(reason)),
        None => Ok(rendered.into_owned()),
    }
}

/// Render and rename the template's base contract so the runner's contract
/// filter picks up the generated suite.
pub fn render_artifact(
    source: &str,
    variables: &TemplateVariables,
    template_contract: &str,
    suite_contract: &str,
) -> Result<Artifact, GorillaError> {
    let rendered = render(source, variables)?;
    Ok(Artifact::new(rendered.replace(template_contract, suite_contract)))
}
