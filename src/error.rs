//! Error types for table access, conversion and spatial queries

use crate::model::ColumnKind;

/// Errors raised by the in-memory engine.
///
/// All variants are local, recoverable conditions; none of them leave a
/// partially constructed value behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Table construction invariants were violated
    #[error("validation error: {0}")]
    Validation(String),

    /// Row or column access past the end
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Column lookup by name failed
    #[error("column not found: {0}")]
    NotFound(String),

    /// Text could not be parsed into the target numeric kind
    #[error("cannot convert {value:?} to {kind}")]
    Conversion { value: String, kind: ColumnKind },

    /// Query point does not match the dimensionality of the index
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl Error {
    pub(crate) fn row_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange {
            what: "row",
            index,
            len,
        }
    }

    pub(crate) fn column_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange {
            what: "column",
            index,
            len,
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;
