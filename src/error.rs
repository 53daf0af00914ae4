use std::path::PathBuf;

use thiserror::Error;

use crate::identifier::QuestId;

/// Errors that can arise in the quest registry and persistence layer.
///
/// Registry lookups never produce these; absence is communicated through
/// `Option` results. The store and the command facade return them so callers
/// can turn a failure into a user-facing message.
#[derive(Debug, Error)]
pub enum QuestError {
    /// Malformed or empty namespace/path in a quest identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Returned by the command facade when a quest id is already in use.
    #[error("quest id already in use: {0}")]
    DuplicateIdentifier(QuestId),

    /// Quest not present in the registry or on disk.
    #[error("quest not found: {0}")]
    NotFound(String),

    /// A quest file that cannot be decoded: bad compression, bad
    /// MessagePack, a missing mandatory field, or an unknown enum name.
    #[error("malformed quest file: {0}")]
    MalformedFile(String),

    /// Directory creation or file read/write failure, with the path that
    /// failed so callers can log useful context.
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl QuestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuestError::Io {
            path: path.into(),
            source,
        }
    }
}
