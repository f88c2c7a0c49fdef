//! File feed — the "upload a .log/.txt file" input mode.

use crate::{Feed, FeedError, LogSource};
use podmortem_core::text::decode_ignoring_invalid;
use podmortem_core::FeedKind;
use std::path::PathBuf;

/// Name hint used when the file name has no usable stem.
const FALLBACK_HINT: &str = "uploaded";

pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn name_hint(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(FALLBACK_HINT)
            .to_string()
    }
}

impl Feed for FileFeed {
    fn kind(&self) -> FeedKind {
        FeedKind::File
    }

    fn read(&mut self) -> Result<LogSource, FeedError> {
        if !self.path.is_file() {
            return Err(FeedError::NotFound(self.path.clone()));
        }
        let bytes = std::fs::read(&self.path).map_err(|source| FeedError::Io {
            what: self.path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), bytes = bytes.len(), "loaded log file");
        Ok(LogSource::new(
            FeedKind::File,
            self.name_hint(),
            decode_ignoring_invalid(&bytes),
        ))
    }
}
