//! Error types for the datewise library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for series and table operations.
pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors that can occur while building or transforming series and tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Invalid argument (window size, lag, count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Accessor or reduction on a collection with no usable values.
    #[error("empty collection")]
    EmptyCollection,

    /// Index lengths disagree.
    #[error("index mismatch: expected {expected} entries, got {got}")]
    IndexMismatch { expected: usize, got: usize },

    /// A series date has no position in the table index.
    #[error("index mismatch: {0} is not part of the table index")]
    IndexNotAligned(NaiveDate),

    /// Index is not strictly increasing.
    #[error("index must be strictly increasing (violated at position {position})")]
    UnorderedIndex { position: usize },

    /// Column lookup failed.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Column name appears twice in one table.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// A key function or summarizer failed; the grouping produced nothing.
    #[error("grouping failed: {0}")]
    Grouping(Box<FrameError>),
}

impl FrameError {
    /// Wrap an error raised inside a grouping, without nesting twice.
    pub(crate) fn grouping(err: FrameError) -> Self {
        match err {
            FrameError::Grouping(_) => err,
            other => FrameError::Grouping(Box::new(other)),
        }
    }
}
