//! Prompt templates compiled into the binary. A file `<name>.txt` in the
//! configured prompts directory replaces the template of the same name.

pub const EXPLOIT_TEST: &str = "exploit-test";
pub const FORMAL_SPECS: &str = "formal-specs";
pub const VIOLATION_TEST: &str = "violation-test";
pub const REPAIR: &str = "repair";

pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        EXPLOIT_TEST => Some(EXPLOIT_TEST_TEMPLATE),
        FORMAL_SPECS => Some(FORMAL_SPECS_TEMPLATE),
        VIOLATION_TEST => Some(VIOLATION_TEST_TEMPLATE),
        REPAIR => Some(REPAIR_TEMPLATE),
        _ => None,
    }
}

/// Fixtures provided by the base template's `setUp`.
pub const TEST_FIXTURES: &str = "\
- token: SimpleERC20 contract instance, deployed by owner
- attacker, victim, owner, user1, user2: test account addresses
- every account holds 100 ETH and an initial token balance
- attackerBalanceBefore, victimBalanceBefore, contractEthBefore: snapshots taken before your code runs
- Foundry cheatcodes: vm.prank(), vm.startPrank(), vm.stopPrank(), vm.deal(), vm.expectRevert(), etc.";

const EXPLOIT_TEST_TEMPLATE: &str = r#"Generate concrete exploit code for the following testing request against a smart contract.

=== Contract Code ===
{{CONTRACT_SOURCE}}

=== Testing Request ===
{{INTENT}}

=== Test Environment ===
{{TEST_FIXTURES}}

=== Task ===
Write the Solidity statements that perform the exploit directly. Do not call helper functions that do not exist in the contract or the test.

Answer strictly in this format, code only, no explanation:

testLogic: <exploit statements, may be several separated by semicolons, on one line>
vulnerabilityAssertions: <assertions proving the exploit succeeded, on one line>

Example:
testLogic: vm.prank(attacker); token.mint(attacker, 1000000 * 10**18);
vulnerabilityAssertions: assertTrue(token.balanceOf(attacker) > attackerBalanceBefore, "Unauthorized mint should succeed");
"#;

const FORMAL_SPECS_TEMPLATE: &str = r#"Produce a formal specification for the following smart contract.

=== Contract Code ===
{{CONTRACT_SOURCE}}

=== Required Content ===
1. invariants: conditions that must always hold
2. pre_conditions: conditions that must hold before a function runs
3. post_conditions: conditions that must hold after a function runs
4. safety_properties: security rules the contract must never break

Special focus: {{FOCUS}}

Return JSON only, exactly in this shape:
{
  "invariants": [
    {"name": "...", "description": "...", "condition": "<Solidity expression>", "check_code": "<Solidity assertion>"}
  ],
  "pre_conditions": [
    {"function": "...", "condition": "...", "description": "..."}
  ],
  "post_conditions": [
    {"function": "...", "condition": "...", "description": "..."}
  ],
  "safety_properties": [
    {"name": "...", "description": "...", "violation_condition": "...", "check_code": "<Solidity assertion>"}
  ]
}
"#;

const VIOLATION_TEST_TEMPLATE: &str = r#"Generate test logic that detects a specification violation in a smart contract.

=== Contract Code ===
{{CONTRACT_SOURCE}}

=== Vulnerability Description ===
{{INTENT}}

=== Formal Specification ===
{{SPEC_BUNDLE}}

=== Test Environment ===
{{TEST_FIXTURES}}

=== Task ===
1. testLogic: Solidity statements that trigger the vulnerability
2. specViolationChecks: assertions showing which invariant or safety property is broken
3. attackVerification: assertions proving the attack succeeded

Answer strictly in this format, code only, each field on one line:

testLogic: <statements>
specViolationChecks: <assertions separated by semicolons>
attackVerification: <assertions>

Example:
testLogic: vm.prank(attacker); token.mint(attacker, 1000000 * 10**18);
specViolationChecks: assertTrue(token.totalSupply() > 1000000 * 10**18, "Supply invariant violated")
attackVerification: assertTrue(token.balanceOf(attacker) > attackerBalanceBefore, "Attack should increase attacker balance")
"#;

const REPAIR_TEMPLATE: &str = r#"The following Foundry test failed. Fix it.

=== Project Context ===
{{PROJECT_CONTEXT}}

=== Testing Request ===
{{INTENT}}

=== Current Test Code ===
```solidity
{{ARTIFACT}}
```

=== Failure ===
Failure kind: {{FAILURE_KIND}}
Runner output:
```
{{DIAGNOSTIC}}
```

=== Fix Guidance (attempt {{ATTEMPT}}/{{MAX_ATTEMPTS}}) ===
{{GUIDANCE}}

=== Requirements ===
1. Find the root cause, paying particular attention to constructor arguments
2. Keep imports correct
3. Keep the intent of the test logic
4. Produce valid Solidity

Return only the complete fixed Solidity file inside a ```solidity block, without explanation.
"#;
