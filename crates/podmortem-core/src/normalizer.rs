//! Normalizer — turns raw log lines into [`LogRecord`] values.
//!
//! Parsing is attempted in two tiers: the strict
//! `timestamp source[pid]: level message` pattern, then a loose
//! timestamp-prefixed split. Lines matching neither are dropped without an
//! error; parsing is best-effort and never fails the caller. The only
//! fallible operations here are the ones that acquire the lines.

use crate::text::decode_ignoring_invalid;
use crate::types::{LevelCounts, LogRecord, UNKNOWN_LEVEL};
use regex::Regex;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static STRICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<timestamp>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z)\s+",
        r"(?P<source>[^\[]+)\[(?P<pid>\d+)\]:\s+",
        r"(?P<level>\w+)\s+(?P<message>.+)",
    ))
    .expect("strict log line pattern must compile")
});

#[derive(Debug, thiserror::Error)]
pub enum NormalizerError {
    #[error("failed to read log source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse one line. Returns `None` for blank lines and for lines that match
/// neither the strict pattern nor the fallback.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = STRICT_LINE.captures(line) {
        return Some(LogRecord {
            timestamp: caps["timestamp"].to_string(),
            source: Some(caps["source"].trim().to_string()),
            pid: Some(caps["pid"].to_string()),
            level: Some(caps["level"].to_string()),
            message: caps["message"].trim().to_string(),
        });
    }

    // Fallback: `<something ending in Z> <rest>`.
    let (head, rest) = line.split_once(char::is_whitespace)?;
    if !head.ends_with('Z') {
        return None;
    }
    Some(LogRecord {
        timestamp: head.to_string(),
        source: None,
        pid: None,
        level: None,
        message: rest.trim().to_string(),
    })
}

/// Parse every line, keeping the survivors in input order.
pub fn load_log<I, S>(lines: I) -> Vec<LogRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| parse_line(line.as_ref()))
        .collect()
}

/// Parse every line from a reader. Invalid UTF-8 is discarded per line.
pub fn load_log_reader<R: BufRead>(mut reader: R) -> std::io::Result<Vec<LogRecord>> {
    let mut records = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if let Some(record) = parse_line(&decode_ignoring_invalid(&buf)) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Read and parse a log file. A missing or unreadable file is the only error.
pub fn load_log_file(path: &Path) -> Result<Vec<LogRecord>, NormalizerError> {
    let file = std::fs::File::open(path).map_err(|source| NormalizerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = load_log_reader(std::io::BufReader::new(file)).map_err(|source| {
        NormalizerError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "log file parsed");
    Ok(records)
}

/// Count records by level token.
pub fn summarize_counts(records: &[LogRecord]) -> LevelCounts {
    let mut counts = LevelCounts::new();
    for record in records {
        let level = record.level.as_deref().unwrap_or(UNKNOWN_LEVEL);
        *counts.entry(level.to_string()).or_insert(0) += 1;
    }
    counts
}
