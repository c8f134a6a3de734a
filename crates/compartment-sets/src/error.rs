//! Error types for compartment set parsing and access.

use std::path::PathBuf;

use cell_ranges::RangeSetError;
use thiserror::Error;

/// Errors that can occur while loading or querying compartment sets.
#[derive(Error, Debug)]
pub enum CompartmentError {
    /// Malformed interchange text or a schema violation.
    #[error("invalid compartment set format: {message}")]
    Format {
        /// Description of the violated constraint.
        message: String,
    },

    /// Indexed access outside `[-len, len - 1]`.
    #[error("index {index} out of range for compartment set of length {len}")]
    IndexOutOfRange {
        /// Requested index (negative counts from the end).
        index: isize,
        /// Number of entries in the collection.
        len: usize,
    },

    /// Lookup of a name that is not in the registry.
    #[error("compartment set not found: {0}")]
    KeyNotFound(String),

    /// File could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Cell id set could not be built.
    #[error("invalid cell id set: {0}")]
    RangeSet(#[from] RangeSetError),
}

impl CompartmentError {
    /// Creates a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for CompartmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::format(err.to_string())
    }
}

/// Result type for compartment set operations.
pub type CompartmentResult<T> = std::result::Result<T, CompartmentError>;
