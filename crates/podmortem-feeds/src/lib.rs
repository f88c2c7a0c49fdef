//! podmortem-feeds — log input sources for podmortem.
//!
//! Each feed acquires one raw text blob (the whole input of a single analysis)
//! and tags it with a short name hint used for the exported report file.
//! Invalid UTF-8 is discarded rather than failing the read.

pub mod file;
pub mod sample;
pub mod stdin;

pub use file::FileFeed;
pub use podmortem_core::FeedKind;
pub use sample::SampleFeed;
pub use stdin::PasteFeed;

use std::path::PathBuf;

/// The raw input of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    pub kind: FeedKind,
    /// Short name for the input, used in the exported file name.
    pub name_hint: String,
    pub text: String,
}

impl LogSource {
    pub fn new(kind: FeedKind, name_hint: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            name_hint: name_hint.into(),
            text: text.into(),
        }
    }

    /// `true` when the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("log file not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("sample file not found at {}", .0.display())]
    SampleMissing(PathBuf),
    #[error("failed to read {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: std::io::Error,
    },
}

/// Trait implemented by each log input source.
pub trait Feed {
    fn kind(&self) -> FeedKind;

    /// Read the whole input. Called once per analysis.
    fn read(&mut self) -> Result<LogSource, FeedError>;
}
