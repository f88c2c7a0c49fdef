//! Paste feed — log text piped or typed on stdin.

use crate::{Feed, FeedError, LogSource};
use podmortem_core::text::decode_ignoring_invalid;
use podmortem_core::FeedKind;
use std::io::Read;

/// Name hint for pasted input.
pub const PASTE_HINT: &str = "pasted";

/// Reads everything from `R` until EOF. Generic so tests can feed a byte slice.
pub struct PasteFeed<R> {
    reader: R,
}

impl PasteFeed<std::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin())
    }
}

impl<R: Read> PasteFeed<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> Feed for PasteFeed<R> {
    fn kind(&self) -> FeedKind {
        FeedKind::Paste
    }

    fn read(&mut self) -> Result<LogSource, FeedError> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|source| FeedError::Io {
                what: "stdin".to_string(),
                source,
            })?;
        tracing::debug!(bytes = bytes.len(), "read pasted logs");
        Ok(LogSource::new(
            FeedKind::Paste,
            PASTE_HINT,
            decode_ignoring_invalid(&bytes),
        ))
    }
}
