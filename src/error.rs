//! Typed errors for the places where callers care about the failure kind.
//! Everything else flows through `anyhow` with context attached.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::ChapterId;
use crate::ui::DestinationKey;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to parse corpus JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read corpus file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chapter {0} appears more than once")]
    DuplicateChapter(ChapterId),

    #[error("chapter {found} follows chapter {previous}; ids must ascend")]
    UnorderedChapter {
        previous: ChapterId,
        found: ChapterId,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("destination {0} is already registered")]
    DuplicateDestination(DestinationKey),

    #[error("no destination registered for {0}")]
    UnknownDestination(DestinationKey),
}
