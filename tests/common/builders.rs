//! Test builders — ergonomic constructors for records, findings and client
//! options.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use podmortem_core::{Finding, LogRecord, Severity};
use podmortem_report::ClientOptions;
use std::time::Duration;

// ---------------------------------------------------------------------------
// LogRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for expected [`LogRecord`] values.
///
/// ```rust
/// let expected = LogRecordBuilder::new("2024-01-01T00:00:00Z", "CrashLoopBackOff detected")
///     .strict("api", "123", "ERROR")
///     .build();
/// ```
pub struct LogRecordBuilder {
    timestamp: String,
    source: Option<String>,
    pid: Option<String>,
    level: Option<String>,
    message: String,
}

impl LogRecordBuilder {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            source: None,
            pid: None,
            level: None,
            message: message.into(),
        }
    }

    pub fn strict(mut self, source: &str, pid: &str, level: &str) -> Self {
        self.source = Some(source.to_string());
        self.pid = Some(pid.to_string());
        self.level = Some(level.to_string());
        self
    }

    pub fn build(self) -> LogRecord {
        LogRecord {
            timestamp: self.timestamp,
            source: self.source,
            pid: self.pid,
            level: self.level,
            message: self.message,
        }
    }
}

/// Build a strict-form log line.
pub fn strict_line(seq: usize, level: &str, message: &str) -> String {
    format!(
        "2024-01-15T10:{:02}:{:02}Z api-{}[{}]: {} {}",
        seq / 60 % 60,
        seq % 60,
        seq % 3,
        1000 + seq,
        level,
        message
    )
}

/// A bare finding with the given hint, for prompt tests.
pub fn finding(hint: &str, severity: Severity) -> Finding {
    Finding {
        pattern: String::new(),
        hint: hint.to_string(),
        severity,
        lines: vec![],
    }
}

// ---------------------------------------------------------------------------
// Client options
// ---------------------------------------------------------------------------

/// Client options pointed at `endpoint` with short timeouts suitable for
/// tests.
pub fn test_client_options(endpoint: impl Into<String>) -> ClientOptions {
    ClientOptions {
        endpoint: endpoint.into(),
        model: "gpt-4o-mini".to_string(),
        temperature: 0.2,
        api_key: "sk-test".to_string(),
        timeout: Duration::from_secs(5),
        max_retries: 1,
        retry_backoff: Duration::from_millis(10),
        max_log_chars: 20_000,
    }
}

/// Write a config file pointing the client at `endpoint`, reading the key
/// from `key_env`. Returns the file path.
pub fn write_test_config(
    dir: &std::path::Path,
    endpoint: &str,
    key_env: &str,
) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let body = format!(
        r#"
[llm]
endpoint = "{endpoint}"
api_key_env = "{key_env}"
timeout_secs = 5
max_retries = 0

[input]
sample_path = "{sample}"
"#,
        sample = super::fixtures::sample_log_path().display(),
    );
    std::fs::write(&path, body).expect("write test config");
    path
}
