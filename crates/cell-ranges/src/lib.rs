//! # cell-ranges
//!
//! Compressed sets of cell ids for selecting subsets of a neuron population.
//!
//! A [`RangeSet`] stores a set of non-negative integers as a sorted list of
//! disjoint, non-adjacent half-open intervals `[start, end)`. The list is
//! normalized at construction, so two sets holding the same ids always have
//! the same intervals and equality is plain structural equality.
//!
//! ## Usage
//!
//! ```rust
//! use cell_ranges::RangeSet;
//!
//! // From individual ids (unsorted, duplicated input is fine)
//! let ids = RangeSet::from_values([5, 1, 2, 3, 2]).unwrap();
//! assert_eq!(ids.ranges(), &[(1, 4), (5, 6)]);
//!
//! // From intervals (overlapping and adjacent intervals are merged)
//! let ranges = RangeSet::from_ranges([(0, 2), (2, 4), (10, 12)]).unwrap();
//! assert_eq!(ranges.ranges(), &[(0, 4), (10, 12)]);
//!
//! assert!(ids.contains(3));
//! assert_eq!(ids.size(), 4);
//! assert_eq!(ids.size_in(&ranges), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for [`RangeSet`] as a list of
//!   `[start, end]` pairs

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod range_set;

pub use error::{RangeSetError, RangeSetResult};
pub use range_set::{Ids, RangeSet};

/// Cell (node) identifier within a population.
pub type CellId = u64;
