use serde::{Deserialize, Serialize};
use crate::parser::extract_json;
use tracing::warn;

/// One specification entry. The oracle is asked for slightly different
/// shapes per collection, so the original spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecItem {
    #[serde(alias = "function")]
    pub name: String,
    pub description: String,
    #[serde(alias = "violation_condition")]
    pub condition: String,
    #[serde(alias = "check_code")]
    pub check: String,
}

impl SpecItem {
    fn new(name: &str, description: &str, condition: &str, check: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            condition: condition.to_string(),
            check: check.to_string(),
        }
    }
}

/// Oracle-produced formal specification of the target contract.
///
/// Missing collections deserialize as empty, not from the fallback bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalSpecBundle {
    #[serde(default)]
    pub invariants: Vec<SpecItem>,
    #[serde(default)]
    pub pre_conditions: Vec<SpecItem>,
    #[serde(default)]
    pub post_conditions: Vec<SpecItem>,
    #[serde(default)]
    pub safety_properties: Vec<SpecItem>,
}

impl Default for FormalSpecBundle {
    /// Fallback used whenever the oracle's bundle is unusable.
    fn default() -> Self {
        Self {
            invariants: vec![SpecItem::new(
                "balance_non_negative",
                "All balances must be non-negative",
                "balanceOf(account) >= 0",
                "assertTrue(token.balanceOf(attacker) >= 0, \"Balance must be non-negative\")",
            )],
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
            safety_properties: vec![SpecItem::new(
                "unauthorized_operations",
                "Prevent unauthorized operations",
                "Non-authorized user executes privileged operation",
                "// Authorization check",
            )],
        }
    }
}

impl FormalSpecBundle {
    /// Parse an oracle response. Anything that is not a JSON object with at
    /// least one entry in some collection yields the default bundle.
    pub fn parse(response: &str) -> Self {
        let value = match extract_json(response) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Spec bundle is not JSON, using default specifications");
                return Self::default();
            }
        };
        match serde_json::from_value::<FormalSpecBundle>(value) {
            Ok(bundle) if !bundle.is_empty() => bundle,
            Ok(_) => {
                warn!("Spec bundle has no entries, using default specifications");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "Spec bundle has unexpected shape, using default specifications");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.invariants.len()
            + self.pre_conditions.len()
            + self.post_conditions.len()
            + self.safety_properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pretty JSON for embedding in the test-logic prompt.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    pub fn summary(&self) -> String {
        format!(
            "{} invariants, {} pre-conditions, {} post-conditions, {} safety properties",
            self.invariants.len(),
            self.pre_conditions.len(),
            self.post_conditions.len(),
            self.safety_properties.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_original_field_names() {
        let response = r#"{
            "invariants": [{"name": "supply", "description": "d", "condition": "c", "check_code": "assertEq(a, b);"}],
            "pre_conditions": [{"function": "mint", "condition": "msg.sender == owner", "description": "only owner"}],
            "post_conditions": [],
            "safety_properties": [{"name": "auth", "description": "d", "violation_condition": "anyone mints", "check_code": "assertTrue(x);"}]
        }"#;
        let bundle = FormalSpecBundle::parse(response);
        assert_eq!(bundle.invariants[0].check, "assertEq(a, b);");
        assert_eq!(bundle.pre_conditions[0].name, "mint");
        assert_eq!(bundle.safety_properties[0].condition, "anyone mints");
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn test_fenced_bundle_accepted() {
        let response = "```json\n{\"invariants\": [{\"name\": \"x\"}]}\n```";
        let bundle = FormalSpecBundle::parse(response);
        assert_eq!(bundle.invariants[0].name, "x");
        assert!(bundle.invariants[0].check.is_empty());
        assert!(bundle.safety_properties.is_empty());
    }

    #[test]
    fn test_malformed_responses_yield_default() {
        for response in ["", "not json", "{ broken", "[1, 2, 3]", "{}", r#"{"invariants": "nope"}"#] {
            assert_eq!(FormalSpecBundle::parse(response), FormalSpecBundle::default(), "{:?}", response);
        }
    }

    #[test]
    fn test_default_bundle_shape() {
        let bundle = FormalSpecBundle::default();
        assert_eq!(bundle.invariants.len(), 1);
        assert_eq!(bundle.invariants[0].name, "balance_non_negative");
        assert!(bundle.pre_conditions.is_empty());
        assert!(bundle.post_conditions.is_empty());
    }

    #[test]
    fn test_prompt_json_contains_items() {
        let json = FormalSpecBundle::default().to_prompt_json();
        assert!(json.contains("balance_non_negative"));
        assert!(json.contains("\"safety_properties\""));
    }
}
