//! podmortem-report — turns log text and heuristic findings into a markdown
//! root-cause-analysis report via a hosted chat-completion model.
//!
//! The report always asks for four sections: Summary, Root Cause, Recommended
//! Fix and Next Steps. Only the first `max_log_chars` characters of the log
//! text are forwarded.

pub mod client;
pub mod prompt;

pub use client::{ChatCompletionClient, ClientOptions, Summarizer};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("API key not set: export {var} or add it to .env")]
    MissingApiKey { var: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to chat-completion endpoint failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat-completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("chat-completion response contained no report")]
    EmptyResponse,
}

impl ReportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ReportError::Http(e) if e.is_timeout())
    }

    /// Transport failures, timeouts, rate limiting and server errors are
    /// worth another attempt. Everything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReportError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ReportError::Api { status, .. } => *status == 429 || *status >= 500,
            ReportError::MissingApiKey { .. }
            | ReportError::Client(_)
            | ReportError::EmptyResponse => false,
        }
    }
}
