//! Sample feed — the bundled example log used for demos.

use crate::{Feed, FeedError, LogSource};
use podmortem_core::text::decode_ignoring_invalid;
use podmortem_core::FeedKind;
use std::path::PathBuf;

/// Name hint for reports generated from the sample.
pub const SAMPLE_HINT: &str = "sample_k8s";

pub struct SampleFeed {
    path: PathBuf,
}

impl SampleFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Feed for SampleFeed {
    fn kind(&self) -> FeedKind {
        FeedKind::Sample
    }

    fn read(&mut self) -> Result<LogSource, FeedError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FeedError::SampleMissing(self.path.clone()));
            }
            Err(source) => {
                return Err(FeedError::Io {
                    what: self.path.display().to_string(),
                    source,
                })
            }
        };
        tracing::info!(path = %self.path.display(), "loaded sample logs");
        Ok(LogSource::new(
            FeedKind::Sample,
            SAMPLE_HINT,
            decode_ignoring_invalid(&bytes),
        ))
    }
}
