//! Renders the base test skeleton into a runnable artifact by substituting
//! `//$name` markers with generated fragments.

pub mod artifact;
pub mod engine;
pub mod variables;

pub use artifact::Artifact;
pub use engine::{read_base_template, render, render_artifact, CANONICAL_BASE_TEMPLATE};
pub use variables::{TemplateVariables, TEST_LOGIC, VULNERABILITY_ASSERTIONS};
