//! Error types for range set construction.

use thiserror::Error;

use crate::CellId;

/// Errors that can occur while building a [`RangeSet`](crate::RangeSet).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeSetError {
    /// A half-open interval with `start >= end`.
    #[error("invalid range [{start}, {end}): start must be less than end")]
    InvalidRange {
        /// Inclusive start of the rejected interval.
        start: CellId,
        /// Exclusive end of the rejected interval.
        end: CellId,
    },

    /// An id whose exclusive end bound does not fit in a [`CellId`].
    #[error("id {0} cannot be stored in a half-open range")]
    IdOverflow(CellId),
}

/// Result type for range set operations.
pub type RangeSetResult<T> = std::result::Result<T, RangeSetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_range() {
        let err = RangeSetError::InvalidRange { start: 5, end: 3 };
        assert_eq!(
            err.to_string(),
            "invalid range [5, 3): start must be less than end"
        );
    }

    #[test]
    fn test_error_display_id_overflow() {
        let err = RangeSetError::IdOverflow(u64::MAX);
        assert_eq!(
            err.to_string(),
            "id 18446744073709551615 cannot be stored in a half-open range"
        );
    }
}
