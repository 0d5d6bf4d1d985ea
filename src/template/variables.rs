use std::collections::BTreeMap;

pub const TEST_LOGIC: &str = "testLogic";
pub const VULNERABILITY_ASSERTIONS: &str = "vulnerabilityAssertions";

const DEFAULT_TEST_LOGIC: &str = "// Vulnerability test logic will be added here";
const DEFAULT_ASSERTIONS: &str = "// Vulnerability assertions will be added here";

/// Placeholder bindings for the base template. `Default` fills every
/// required placeholder with a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariables {
    values: BTreeMap<String, String>,
}

impl TemplateVariables {
    pub fn new(test_logic: impl Into<String>, vulnerability_assertions: impl Into<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(TEST_LOGIC.to_string(), test_logic.into());
        values.insert(VULNERABILITY_ASSERTIONS.to_string(), vulnerability_assertions.into());
        Self { values }
    }

    pub fn test_logic(&self) -> &str {
        self.get(TEST_LOGIC).unwrap_or(DEFAULT_TEST_LOGIC)
    }

    pub fn vulnerability_assertions(&self) -> &str {
        self.get(VULNERABILITY_ASSERTIONS).unwrap_or(DEFAULT_ASSERTIONS)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }
}

impl Default for TemplateVariables {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_LOGIC, DEFAULT_ASSERTIONS)
    }
}
