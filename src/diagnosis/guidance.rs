use super::classifier::FailureKind;

const COMPILATION: &str = "\
- Check the constructor parameter types and order
- SimpleERC20 constructor expects: (string _name, string _symbol, uint8 _decimals, uint256 _totalSupply)
- Ensure string parameters are quoted
- Ensure numeric parameter types are correct
- Verify import statements";

const RUNTIME: &str = "\
- Check contract state and balances
- Validate function preconditions
- Ensure accounts have sufficient token balances
- Verify allowance settings";

const ASSERTION: &str = "\
- Check that assertion expectations are correct
- Validate that test logic matches the intent
- Ensure balance calculations are correct";

const DEPENDENCY: &str = "\
- Verify import paths
- Ensure all dependent contract files exist
- Validate forge-std imports";

const UNKNOWN: &str = "\
- Carefully read the error details
- Check for syntax errors
- Verify contract instantiation process
- Ensure all variables are initialized correctly";

/// Canned repair guidance for a failure kind.
pub fn guidance_for(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Compilation => COMPILATION,
        FailureKind::Runtime => RUNTIME,
        FailureKind::Assertion => ASSERTION,
        FailureKind::Dependency => DEPENDENCY,
        FailureKind::Unknown => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_distinct_guidance() {
        let kinds = [
            FailureKind::Compilation,
            FailureKind::Runtime,
            FailureKind::Assertion,
            FailureKind::Dependency,
            FailureKind::Unknown,
        ];
        let blocks: std::collections::HashSet<_> = kinds.iter().map(|k| guidance_for(*k)).collect();
        assert_eq!(blocks.len(), kinds.len());
        assert!(guidance_for(FailureKind::Compilation).contains("constructor"));
    }
}
