//! One analysis request: validate input, triage, summarize.

use podmortem_core::{load_log, summarize_counts, Finding, LevelCounts, LogRecord, RuleSet};
use podmortem_feeds::LogSource;
use podmortem_report::{ReportError, Summarizer};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Please provide logs before analyzing.")]
    EmptyInput,
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// The network-free part of an analysis.
#[derive(Debug, Clone)]
pub struct Triage {
    pub records: Vec<LogRecord>,
    pub counts: LevelCounts,
    pub findings: Vec<Finding>,
}

/// Everything produced by a completed analysis. Owned by the caller; this is
/// what gets rendered and exported.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub source_hint: String,
    pub record_count: usize,
    pub counts: LevelCounts,
    pub findings: Vec<Finding>,
    /// Markdown exactly as returned by the summarizer.
    pub report: String,
}

/// Normalize and classify `text`. The two passes are independent.
pub fn triage(text: &str, rules: &RuleSet) -> Triage {
    let records = load_log(text.lines());
    let counts = summarize_counts(&records);
    let findings = rules.classify(text);
    tracing::debug!(
        records = records.len(),
        findings = findings.len(),
        "triage complete"
    );
    Triage {
        records,
        counts,
        findings,
    }
}

/// Run the whole pipeline for one input. Blank input is rejected before any
/// classification or network call.
pub async fn analyze<S: Summarizer>(
    source: &LogSource,
    rules: &RuleSet,
    summarizer: &S,
) -> Result<AnalysisOutcome, AnalysisError> {
    if source.is_blank() {
        return Err(AnalysisError::EmptyInput);
    }

    let Triage {
        records,
        counts,
        findings,
    } = triage(&source.text, rules);

    let report = summarizer.summarize(&source.text, &findings).await?;
    tracing::info!(
        source = %source.kind,
        hint = %source.name_hint,
        findings = findings.len(),
        "analysis complete"
    );

    Ok(AnalysisOutcome {
        source_hint: source.name_hint.clone(),
        record_count: records.len(),
        counts,
        findings,
        report,
    })
}
