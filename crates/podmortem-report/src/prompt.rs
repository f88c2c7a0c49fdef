//! Prompt assembly for the RCA report.

use podmortem_core::Finding;

pub const SYSTEM_PROMPT: &str = "\
You are an SRE/DevOps assistant.
Input: Kubernetes logs + heuristic hints.
Output: concise markdown with:
1. Summary
2. Root Cause (probable)
3. Recommended Fix (exact steps/kubectl if possible)
4. Next Steps
Format clearly with bullet points.
";

/// Section headings every report is expected to carry, in order.
pub const REPORT_SECTIONS: [&str; 4] = ["Summary", "Root Cause", "Recommended Fix", "Next Steps"];

/// The first `max_chars` characters of `text` (characters, not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Hints as a markdown bullet list, or `- None` when nothing matched.
pub fn format_hints(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "- None".to_string();
    }
    findings
        .iter()
        .map(|f| format!("- {}", f.hint))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_user_prompt(log_text: &str, findings: &[Finding], max_log_chars: usize) -> String {
    format!(
        "Logs:\n'''\n{}\n'''\nHeuristic Hints:\n{}\n\nCreate the markdown summary now.\n",
        truncate_chars(log_text, max_log_chars),
        format_hints(findings),
    )
}

/// Sections from [`REPORT_SECTIONS`] that the report does not mention.
pub fn missing_sections(markdown: &str) -> Vec<&'static str> {
    let lower = markdown.to_lowercase();
    REPORT_SECTIONS
        .iter()
        .copied()
        .filter(|section| !lower.contains(&section.to_lowercase()))
        .collect()
}
