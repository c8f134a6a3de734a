//! Canonical interval storage for sets of cell ids.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::{RangeSetError, RangeSetResult};
use crate::CellId;

/// A set of cell ids stored as disjoint half-open intervals.
///
/// The intervals are kept in canonical form: sorted by start, each
/// non-empty, and no two of them overlapping or touching. Every id set has
/// exactly one canonical form, so the derived equality compares sets.
///
/// # Example
///
/// ```rust
/// use cell_ranges::RangeSet;
///
/// let selection = RangeSet::from_ranges([(10, 20), (0, 5), (4, 8)]).unwrap();
/// assert_eq!(selection.ranges(), &[(0, 8), (10, 20)]);
/// assert_eq!(selection.size(), 18);
/// assert!(selection.contains(7));
/// assert!(!selection.contains(8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RangeSet {
    ranges: Vec<(CellId, CellId)>,
}

impl RangeSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a set from half-open `(start, end)` intervals.
    ///
    /// Input may be unsorted, overlapping or duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`RangeSetError::InvalidRange`] for any interval with
    /// `start >= end`.
    pub fn from_ranges<I>(ranges: I) -> RangeSetResult<Self>
    where
        I: IntoIterator<Item = (CellId, CellId)>,
    {
        let ranges = ranges
            .into_iter()
            .map(|(start, end)| {
                if start < end {
                    Ok((start, end))
                } else {
                    Err(RangeSetError::InvalidRange { start, end })
                }
            })
            .collect::<RangeSetResult<Vec<_>>>()?;
        Ok(Self {
            ranges: collapse(ranges),
        })
    }

    /// Creates a set from individual ids.
    ///
    /// Input may be unsorted or contain duplicates. Runs of consecutive ids
    /// are stored as a single interval.
    ///
    /// # Errors
    ///
    /// Returns [`RangeSetError::IdOverflow`] for `u64::MAX`, whose exclusive
    /// end bound is not representable.
    pub fn from_values<I>(values: I) -> RangeSetResult<Self>
    where
        I: IntoIterator<Item = CellId>,
    {
        let ranges = values
            .into_iter()
            .map(|id| {
                id.checked_add(1)
                    .map(|end| (id, end))
                    .ok_or(RangeSetError::IdOverflow(id))
            })
            .collect::<RangeSetResult<Vec<_>>>()?;
        Ok(Self {
            ranges: collapse(ranges),
        })
    }

    /// Returns the canonical intervals.
    #[inline]
    pub fn ranges(&self) -> &[(CellId, CellId)] {
        &self.ranges
    }

    /// Returns the number of canonical intervals.
    #[inline]
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if the set holds no ids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the number of ids in the set.
    pub fn size(&self) -> u64 {
        self.ranges.iter().map(|&(start, end)| end - start).sum()
    }

    /// Returns the number of ids present in both `self` and `subset`.
    ///
    /// Walks both interval lists once; neither set is expanded.
    pub fn size_in(&self, subset: &RangeSet) -> u64 {
        let (mut i, mut j) = (0, 0);
        let mut total = 0;
        while i < self.ranges.len() && j < subset.ranges.len() {
            let (a_start, a_end) = self.ranges[i];
            let (b_start, b_end) = subset.ranges[j];
            let lo = a_start.max(b_start);
            let hi = a_end.min(b_end);
            if lo < hi {
                total += hi - lo;
            }
            if a_end <= b_end {
                i += 1;
            } else {
                j += 1;
            }
        }
        total
    }

    /// Checks whether `id` is in the set (O(log n) in the interval count).
    pub fn contains(&self, id: CellId) -> bool {
        let idx = self.ranges.partition_point(|&(_, end)| end <= id);
        self.ranges
            .get(idx)
            .is_some_and(|&(start, _)| start <= id)
    }

    /// Returns a lazy iterator over all ids in ascending order.
    pub fn ids(&self) -> Ids<'_> {
        Ids {
            ranges: self.ranges.iter(),
            current: 0..0,
        }
    }

    /// Expands the set into a sorted `Vec` of ids.
    pub fn flatten(&self) -> Vec<CellId> {
        self.ids().collect()
    }
}

/// Sorts intervals and merges any that overlap or touch.
fn collapse(mut ranges: Vec<(CellId, CellId)>) -> Vec<(CellId, CellId)> {
    ranges.sort_unstable();
    let mut merged: Vec<(CellId, CellId)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged.shrink_to_fit();
    merged
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeSet([")?;
        for (i, (start, end)) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}]", start, end)?;
        }
        write!(f, "])")
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = CellId;
    type IntoIter = Ids<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids()
    }
}

/// Ascending iterator over the ids of a [`RangeSet`].
///
/// Created by [`RangeSet::ids`].
#[derive(Debug, Clone)]
pub struct Ids<'a> {
    ranges: std::slice::Iter<'a, (CellId, CellId)>,
    current: Range<CellId>,
}

impl Iterator for Ids<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        loop {
            if let Some(id) = self.current.next() {
                return Some(id);
            }
            let &(start, end) = self.ranges.next()?;
            self.current = start..end;
        }
    }
}

impl FusedIterator for Ids<'_> {}

#[cfg(feature = "serde")]
impl serde::Serialize for RangeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ranges.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RangeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ranges = Vec::<(CellId, CellId)>::deserialize(deserializer)?;
        RangeSet::from_ranges(ranges).map_err(serde::de::Error::custom)
    }
}
