// Library error type.
//
// Most failures in the pipeline are recovered locally (a missing stopword
// file, a sampler that exits nonzero). What remains here are the contract
// violations and I/O faults that callers have to see.

use std::path::PathBuf;

use crate::corpus::vocabulary::WordId;

/// Errors surfaced by the corpus, exchange and topic layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A word id that the vocabulary never allocated (0 is reserved).
    #[error("word id {id} is out of range (vocabulary has {max} words)")]
    OutOfRange { id: WordId, max: WordId },

    /// The sampler reported a topic outside the configured class count.
    #[error("topic {id} is out of range for {classes} classes; sampler output does not match the configuration")]
    TopicIndex { id: usize, classes: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sampler could not be run, or its failure was escalated by policy.
    #[error("sampler failed: {0}")]
    Sampler(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
