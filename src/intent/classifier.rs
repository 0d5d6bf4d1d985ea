use serde::{Deserialize, Serialize};

/// Terms that switch a request into spec-violation mode. Matched as
/// case-insensitive substrings; any single hit is enough.
const SPEC_KEYWORDS: &[&str] = &[
    "invariant",
    "specification",
    "pre-condition",
    "post-condition",
    "precondition",
    "postcondition",
    "violation",
    "formal",
    "不变量",
    "规范",
    "前置条件",
    "后置条件",
    "违反",
    "形式化",
];

/// Category keyword table, checked top to bottom. First match wins.
const CATEGORY_KEYWORDS: &[(VulnerabilityCategory, &[&str])] = &[
    (
        VulnerabilityCategory::UnauthorizedPrivilegedCall,
        &["mint", "unauthorized", "authorization", "privilege", "权限"],
    ),
    (
        VulnerabilityCategory::AllowanceBypass,
        &["allowance", "transferfrom", "授权"],
    ),
    (
        VulnerabilityCategory::Reentrancy,
        &["reentrancy", "reentrant", "withdraw", "重入"],
    ),
    (
        VulnerabilityCategory::IntegerOverflow,
        &["overflow", "underflow", "unchecked", "溢出"],
    ),
];

/// Category assigned when no keyword matches. Requests that name no known
/// vulnerability are generated as privileged-call tests, which can produce
/// misleading tests for unrelated intents.
pub const DEFAULT_CATEGORY: VulnerabilityCategory = VulnerabilityCategory::UnauthorizedPrivilegedCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    Exploit,
    SpecViolation,
}

impl OperatingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exploit => "exploit",
            Self::SpecViolation => "spec_violation",
        }
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityCategory {
    UnauthorizedPrivilegedCall,
    AllowanceBypass,
    Reentrancy,
    IntegerOverflow,
    Unclassified,
}

impl VulnerabilityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedPrivilegedCall => "unauthorized_mint",
            Self::AllowanceBypass => "allowance_bypass",
            Self::Reentrancy => "reentrancy",
            Self::IntegerOverflow => "integer_overflow",
            Self::Unclassified => "unclassified",
        }
    }

    /// Human description used as the focus line of the bundle prompt.
    pub fn focus_description(&self) -> &'static str {
        match self {
            Self::UnauthorizedPrivilegedCall => {
                "privileged functions (e.g. mint) callable without authorization"
            }
            Self::AllowanceBypass => "transferFrom paths that do not consume or respect the allowance",
            Self::Reentrancy => "external calls made before state updates (e.g. in withdraw)",
            Self::IntegerOverflow => "arithmetic that can overflow or underflow (e.g. unchecked blocks)",
            Self::Unclassified => "general contract safety",
        }
    }
}

impl std::fmt::Display for VulnerabilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify_mode(intent: &str) -> OperatingMode {
    let lower = intent.to_lowercase();
    if SPEC_KEYWORDS.iter().any(|k| lower.contains(k)) {
        OperatingMode::SpecViolation
    } else {
        OperatingMode::Exploit
    }
}

pub fn classify_category(intent: &str) -> VulnerabilityCategory {
    let lower = intent.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_exploit_request() {
        let intent = "verify whether the privileged minting function can be called by any caller";
        assert_eq!(classify_mode(intent), OperatingMode::Exploit);
    }

    #[test]
    fn test_spec_keyword_selects_spec_violation() {
        let intent = "generate a formal specification and check whether the privileged minting function violates an authorization invariant";
        assert_eq!(classify_mode(intent), OperatingMode::SpecViolation);
    }

    #[test]
    fn test_mode_is_case_insensitive() {
        for intent in ["check the INVARIANT", "check the Invariant", "check the invariant"] {
            assert_eq!(classify_mode(intent), OperatingMode::SpecViolation);
        }
        let intent = "Test Transfer Of Tokens";
        assert_eq!(classify_mode(intent), classify_mode(&intent.to_uppercase()));
        assert_eq!(classify_mode(intent), classify_mode(&intent.to_lowercase()));
    }

    #[test]
    fn test_every_spec_keyword_matches() {
        for keyword in SPEC_KEYWORDS {
            let intent = format!("please look at the {} here", keyword.to_uppercase());
            assert_eq!(classify_mode(&intent), OperatingMode::SpecViolation, "{}", keyword);
        }
    }

    #[test]
    fn test_category_priority_privileged_before_overflow() {
        let intent = "check mint for overflow";
        assert_eq!(classify_category(intent), VulnerabilityCategory::UnauthorizedPrivilegedCall);
    }

    #[test]
    fn test_category_each_kind() {
        assert_eq!(classify_category("allowance is never reduced"), VulnerabilityCategory::AllowanceBypass);
        assert_eq!(classify_category("TransferFrom misuse"), VulnerabilityCategory::AllowanceBypass);
        assert_eq!(classify_category("withdraw can be re-entered"), VulnerabilityCategory::Reentrancy);
        assert_eq!(classify_category("unchecked arithmetic"), VulnerabilityCategory::IntegerOverflow);
    }

    #[test]
    fn test_category_allowance_before_reentrancy() {
        let intent = "allowance drained through withdraw";
        assert_eq!(classify_category(intent), VulnerabilityCategory::AllowanceBypass);
    }

    #[test]
    fn test_category_default_policy() {
        assert_eq!(classify_category("check the token name"), DEFAULT_CATEGORY);
        assert_eq!(DEFAULT_CATEGORY, VulnerabilityCategory::UnauthorizedPrivilegedCall);
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(OperatingMode::SpecViolation.to_string(), "spec_violation");
        assert_eq!(VulnerabilityCategory::Reentrancy.to_string(), "reentrancy");
    }
}
