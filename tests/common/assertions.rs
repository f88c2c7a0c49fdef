//! Domain-specific assertion macros for podmortem harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* record or finding invariant was violated.

use podmortem_core::{Finding, LogRecord, RuleSet};

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert that a record came from the strict pattern: every optional field
/// is populated.
///
/// ```rust
/// assert_structured!(record);
/// ```
#[macro_export]
macro_rules! assert_structured {
    ($record:expr) => {{
        let record: &podmortem_core::LogRecord = &$record;
        if record.source.is_none() || record.pid.is_none() || record.level.is_none() {
            panic!(
                "assert_structured! failed: strict fields missing.\n  record: {:?}",
                record
            );
        }
    }};
}

/// Assert that a record came from the fallback split: only timestamp and
/// message are set.
#[macro_export]
macro_rules! assert_fallback {
    ($record:expr) => {{
        let record: &podmortem_core::LogRecord = &$record;
        if record.source.is_some() || record.pid.is_some() || record.level.is_some() {
            panic!(
                "assert_fallback! failed: strict fields present on fallback record.\n  record: {:?}",
                record
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Finding assertions
// ---------------------------------------------------------------------------

/// Assert that a finding list contains a hint mentioning `needle`
/// (case-insensitive).
///
/// ```rust
/// assert_has_hint!(findings, "memory limit");
/// ```
#[macro_export]
macro_rules! assert_has_hint {
    ($findings:expr, $needle:expr) => {{
        let findings: &[podmortem_core::Finding] = &$findings;
        let needle: &str = $needle;
        let lower = needle.to_lowercase();
        if !findings.iter().any(|f| f.hint.to_lowercase().contains(&lower)) {
            panic!(
                "assert_has_hint! failed: no hint mentions {:?}.\n  hints: {:?}",
                needle,
                findings.iter().map(|f| &f.hint).collect::<Vec<_>>()
            );
        }
    }};
}

/// Position of each finding's rule in `rules`, by pattern.
pub fn rule_positions(rules: &RuleSet, findings: &[Finding]) -> Vec<usize> {
    findings
        .iter()
        .map(|f| {
            rules
                .rules()
                .iter()
                .position(|r| r.pattern() == f.pattern)
                .unwrap_or_else(|| panic!("finding pattern {:?} is not in the rule set", f.pattern))
        })
        .collect()
}

/// Assert that findings appear in strictly increasing rule-table order.
pub fn assert_table_order(rules: &RuleSet, findings: &[Finding]) {
    let positions = rule_positions(rules, findings);
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "findings out of rule-table order: {positions:?}"
    );
}

/// Assert that the records are the given messages, in order.
pub fn assert_messages(records: &[LogRecord], expected: &[&str]) {
    let actual: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
    pretty_assertions::assert_eq!(actual, expected);
}
