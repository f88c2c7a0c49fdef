//! podmortem — heuristic triage and AI root-cause reports for Kubernetes logs.
//!
//! This crate wires the library layers into one analysis request and exposes
//! the pieces the CLI and integration tests use directly.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► LogSource ──► Normalizer ──► level counts ─┐
//!                  │                                  ├──► Summarizer ──► Export
//!                  └───► Classifier ──► findings ─────┘
//! ```
//!
//! Nothing is kept between requests: each call to [`analysis::analyze`]
//! returns a caller-owned [`analysis::AnalysisOutcome`].

pub mod analysis;
pub mod export;
pub mod render;
