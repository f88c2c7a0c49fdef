//! podmortem-core — log normalization and heuristic classification.
//!
//! This crate holds the two pure layers of the pipeline plus the shared types
//! and configuration.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► Normalizer ──► records ──► level counts ─┐
//!    │                                                  ├──► Report
//!    └───────► Classifier ──► findings ─────────────────┘
//! ```
//!
//! Both layers are independent pure functions over the same input and share
//! no mutable state. The rule table is read-only once built.

pub mod config;
pub mod heuristics;
pub mod normalizer;
pub mod text;
pub mod types;

pub use heuristics::{HeuristicRule, RuleError, RuleSet};
pub use normalizer::{load_log, load_log_file, load_log_reader, parse_line, summarize_counts};
pub use types::{FeedKind, Finding, LevelCounts, LogRecord, Severity, UNKNOWN_LEVEL};
