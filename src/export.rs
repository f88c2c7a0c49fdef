//! Export — writes the report as a markdown artifact.
//!
//! File names follow `{hint}-ai-log-analysis-{YYYYMMDD-HHMM}.md` in local
//! time; the content is exactly the report markdown.

use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};

pub fn artifact_file_name<Tz: TimeZone>(source_hint: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}-ai-log-analysis-{}.md",
        source_hint,
        at.format("%Y%m%d-%H%M")
    )
}

/// Write `markdown` into `dir` (created if missing), stamped with `at`.
pub fn write_report_at(
    dir: &Path,
    source_hint: &str,
    markdown: &str,
    at: &DateTime<Local>,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(artifact_file_name(source_hint, at));
    std::fs::write(&path, markdown)?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(path)
}

/// Write `markdown` into `dir`, stamped with the current local time.
pub fn write_report(dir: &Path, source_hint: &str, markdown: &str) -> std::io::Result<PathBuf> {
    write_report_at(dir, source_hint, markdown, &Local::now())
}
