//! Terminal presentation of findings, counts and parsed records.
//!
//! Severity badges are coloured with the same palette the web UI used (red
//! for errors, amber for warnings, green for info). Colour is only emitted
//! when the caller asks for it, normally when stdout is a terminal.

use crossterm::style::{Color, Stylize};
use podmortem_core::{Finding, LevelCounts, LogRecord, Severity};
use std::io::{self, Write};

/// Longest message prefix shown in record previews.
const PREVIEW_CHARS: usize = 120;

const NO_FINDINGS: &str = "No common failure patterns detected.";

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Rgb { r: 0xB9, g: 0x1C, b: 0x1C },
        Severity::Warning => Color::Rgb { r: 0xD9, g: 0x77, b: 0x06 },
        Severity::Info => Color::Rgb { r: 0x15, g: 0x80, b: 0x3D },
    }
}

/// One finding as a badge: `[severity] hint`, or a coloured pill when
/// `color` is set.
pub fn badge(finding: &Finding, color: bool) -> String {
    if color {
        format!(" {} ", finding.hint)
            .with(Color::White)
            .on(severity_color(finding.severity))
            .to_string()
    } else {
        format!("[{}] {}", finding.severity, finding.hint)
    }
}

pub fn write_findings<W: Write>(out: &mut W, findings: &[Finding], color: bool) -> io::Result<()> {
    writeln!(out, "Heuristic Matches")?;
    if findings.is_empty() {
        return writeln!(out, "{NO_FINDINGS}");
    }
    for finding in findings {
        write!(out, "{}", badge(finding, color))?;
        if !finding.lines.is_empty() {
            write!(out, "  (lines {})", format_lines(&finding.lines))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_counts<W: Write>(out: &mut W, counts: &LevelCounts) -> io::Result<()> {
    writeln!(out, "Counts by level:")?;
    for (level, count) in counts {
        writeln!(out, "  {level:<8} {count}")?;
    }
    Ok(())
}

/// Numbered preview of the first `limit` records.
pub fn write_records<W: Write>(out: &mut W, records: &[LogRecord], limit: usize) -> io::Result<()> {
    for (i, record) in records.iter().take(limit).enumerate() {
        let message: String = record.message.chars().take(PREVIEW_CHARS).collect();
        writeln!(
            out,
            "[{}] {} {} {} {}",
            i + 1,
            record.timestamp,
            record.source.as_deref().unwrap_or("-"),
            record.level.as_deref().unwrap_or("-"),
            message,
        )?;
    }
    Ok(())
}

/// Comma-separated line numbers, shortened after the first few.
fn format_lines(lines: &[usize]) -> String {
    const SHOWN: usize = 5;
    let mut out = lines
        .iter()
        .take(SHOWN)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if lines.len() > SHOWN {
        out.push_str(&format!(", … +{}", lines.len() - SHOWN));
    }
    out
}
