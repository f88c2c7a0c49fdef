//! Heuristic classifier — flags known Kubernetes failure signatures.
//!
//! A [`RuleSet`] is an ordered table of `(pattern, hint, severity)` rules.
//! [`RuleSet::classify`] searches the *whole* raw text with every rule,
//! case-insensitively, and returns one [`Finding`] per matching rule in table
//! order. Searching the text as a whole rather than line by line lets
//! signatures that spread across lines still register, at the cost of not
//! being able to pin a match to a single entry.
//!
//! The rule table is injected at construction. [`RuleSet::kubernetes`] builds
//! the built-in table; tests and config files can supply their own.

use crate::config::HeuristicsConfig;
use crate::types::{Finding, Severity};
use regex::{Regex, RegexBuilder};

/// Built-in rule table: `(pattern, hint, severity)`.
const KUBERNETES_RULES: &[(&str, &str, Severity)] = &[
    (
        r"OOMKilled",
        "Container exceeded memory limit (OOMKilled).",
        Severity::Error,
    ),
    (
        r"502 Bad Gateway|5\d{2}\b",
        "Upstream/service returning 5xx.",
        Severity::Error,
    ),
    (
        r"CrashLoopBackOff",
        "Pod stuck in CrashLoopBackOff.",
        Severity::Warning,
    ),
    (
        r"ImagePullBackOff|Failed to pull image",
        "Image pull/registry or tag issue.",
        Severity::Warning,
    ),
    (
        r"Back[- ]off restarting",
        "Back-off: container repeatedly failing to start.",
        Severity::Warning,
    ),
    (
        r"FailedMount|MountVolume.SetUp failed",
        "Volume mount failure (PVC/hostPath/permissions).",
        Severity::Warning,
    ),
    (
        r"Liveness probe failed|Readiness probe failed",
        "Probe failure – app not responding / probe misconfig.",
        Severity::Warning,
    ),
    (
        r"\bStarted\b|\bPulling\b|\bCreated\b",
        "Informational event.",
        Severity::Info,
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("invalid heuristic pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// One entry of the rule table. The pattern is compiled case-insensitively
/// when the rule is built.
#[derive(Debug, Clone)]
pub struct HeuristicRule {
    pattern: String,
    regex: Regex,
    hint: String,
    severity: Severity,
}

impl HeuristicRule {
    pub fn new(
        pattern: impl Into<String>,
        hint: impl Into<String>,
        severity: Severity,
    ) -> Result<Self, RuleError> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        Ok(Self {
            pattern,
            regex,
            hint: hint.into(),
            severity,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Test this rule against `raw`, producing a finding on match.
    fn evaluate(&self, raw: &str) -> Option<Finding> {
        if !self.is_match(raw) {
            return None;
        }
        let lines = raw
            .lines()
            .enumerate()
            .filter(|(_, line)| self.is_match(line))
            .map(|(idx, _)| idx + 1)
            .collect();
        Some(Finding {
            pattern: self.pattern.clone(),
            hint: self.hint.clone(),
            severity: self.severity,
            lines,
        })
    }
}

/// An ordered, immutable table of heuristic rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<HeuristicRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<HeuristicRule>) -> Self {
        Self { rules }
    }

    /// The built-in Kubernetes rule table.
    pub fn kubernetes() -> Self {
        let rules = KUBERNETES_RULES
            .iter()
            .map(|(pattern, hint, severity)| {
                HeuristicRule::new(*pattern, *hint, *severity)
                    .expect("built-in heuristic patterns must compile")
            })
            .collect();
        Self::new(rules)
    }

    /// Build the rule set described by the `[heuristics]` config section: the
    /// built-in table (unless disabled) followed by any extra rules.
    pub fn from_config(cfg: &HeuristicsConfig) -> Result<Self, RuleError> {
        let mut rules = if cfg.builtin {
            Self::kubernetes().rules
        } else {
            Vec::new()
        };
        for extra in &cfg.rules {
            rules.push(HeuristicRule::new(
                extra.pattern.as_str(),
                extra.hint.as_str(),
                extra.severity.unwrap_or_default(),
            )?);
        }
        tracing::debug!(rules = rules.len(), builtin = cfg.builtin, "rule set built");
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule over the whole text. Never fails; no match yields an
    /// empty vector.
    pub fn classify(&self, raw: &str) -> Vec<Finding> {
        let findings: Vec<Finding> = self.rules.iter().filter_map(|r| r.evaluate(raw)).collect();
        tracing::debug!(
            bytes = raw.len(),
            findings = findings.len(),
            "heuristics evaluated"
        );
        findings
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::kubernetes()
    }
}
