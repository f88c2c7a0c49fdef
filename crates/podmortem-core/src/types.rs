//! Core types for podmortem-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! parsed [`LogRecord`], the [`Finding`] produced by a heuristic rule, its
//! [`Severity`], and the [`FeedKind`] discriminant for input sources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts of records keyed by level token. Records without a level are
/// bucketed under [`UNKNOWN_LEVEL`].
pub type LevelCounts = BTreeMap<String, usize>;

/// Bucket key used by [`summarize_counts`](crate::normalizer::summarize_counts)
/// for records that carry no level.
pub const UNKNOWN_LEVEL: &str = "UNKNOWN";

/// One parsed log line.
///
/// Only `timestamp` and `message` are guaranteed. `source`, `pid` and `level`
/// are populated when the strict `timestamp source[pid]: level message` form
/// matched, and left as `None` when the record came from the fallback split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// `YYYY-MM-DDThh:mm:ssZ` for strict matches; the first token of the line
    /// for fallback matches.
    pub timestamp: String,
    /// Emitting component, trimmed.
    pub source: Option<String>,
    /// Process id as written in the line.
    pub pid: Option<String>,
    /// Level token, verbatim (`INFO`, `warn`, `Error`, ...).
    pub level: Option<String>,
    /// Remainder of the line, trimmed.
    pub message: String,
}

impl LogRecord {
    /// `true` when the record came from the strict pattern.
    pub fn is_structured(&self) -> bool {
        self.level.is_some()
    }

    /// The timestamp parsed as RFC 3339, if it is one. Fallback records often
    /// carry arbitrary `...Z` tokens, so this is best-effort.
    pub fn parsed_timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&chrono::Utc))
    }
}

/// Severity attached to a heuristic rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// The result of one heuristic rule matching the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Source of the rule's regular expression.
    pub pattern: String,
    /// Human-readable explanation forwarded to the report.
    pub hint: String,
    pub severity: Severity,
    /// 1-based numbers of the lines on which the pattern matches by itself.
    /// Empty when the match only exists across a line boundary.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<usize>,
}

/// Which input mode produced the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Paste,
    File,
    Sample,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Paste => write!(f, "paste"),
            FeedKind::File => write!(f, "file"),
            FeedKind::Sample => write!(f, "sample"),
        }
    }
}
