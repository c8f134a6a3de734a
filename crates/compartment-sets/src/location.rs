//! A single compartment location within a cell.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use cell_ranges::CellId;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one compartment: a cell, a section of that cell, and a
/// relative position along the section.
///
/// Locations are ordered lexicographically by `(cell_id, section_id,
/// offset)`. Offsets are compared with [`f64::total_cmp`], which makes the
/// order total and keeps `Eq`, `Ord` and `Hash` consistent with each other.
///
/// The offset is conventionally in `[0, 1]` but is not checked here; see
/// [`ParseConfig`](crate::ParseConfig) for parse-time validation.
///
/// In JSON a location is the array `[cell_id, section_id, offset]`.
///
/// # Example
///
/// ```rust
/// use compartment_sets::LocatedCompartment;
///
/// let a = LocatedCompartment::new(1, 10, 0.5);
/// let b = LocatedCompartment::new(1, 10, 0.75);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "LocatedCompartment(1, 10, 0.5)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocatedCompartment {
    cell_id: CellId,
    section_id: u64,
    offset: f64,
}

impl LocatedCompartment {
    /// Creates a location from its three fields.
    pub fn new(cell_id: CellId, section_id: u64, offset: f64) -> Self {
        Self {
            cell_id,
            section_id,
            offset,
        }
    }

    /// Global id of the cell the compartment belongs to.
    #[inline]
    pub fn cell_id(&self) -> CellId {
        self.cell_id
    }

    /// Absolute section index within the cell.
    #[inline]
    pub fn section_id(&self) -> u64 {
        self.section_id
    }

    /// Relative position along the section.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl PartialEq for LocatedCompartment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LocatedCompartment {}

impl PartialOrd for LocatedCompartment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocatedCompartment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cell_id
            .cmp(&other.cell_id)
            .then(self.section_id.cmp(&other.section_id))
            .then_with(|| self.offset.total_cmp(&other.offset))
    }
}

impl Hash for LocatedCompartment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cell_id.hash(state);
        self.section_id.hash(state);
        self.offset.to_bits().hash(state);
    }
}

impl fmt::Display for LocatedCompartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LocatedCompartment({}, {}, {:?})",
            self.cell_id, self.section_id, self.offset
        )
    }
}

impl Serialize for LocatedCompartment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.cell_id, self.section_id, self.offset).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LocatedCompartment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(LocationVisitor)
    }
}

/// Accepts exactly `[unsigned int, unsigned int, number]`.
struct LocationVisitor;

impl<'de> Visitor<'de> for LocationVisitor {
    type Value = LocatedCompartment;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of exactly 3 elements: [node_id, section_index, offset]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let cell_id: CellId = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let section_id: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let offset: f64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;

        let mut extra = 0;
        while seq.next_element::<IgnoredAny>()?.is_some() {
            extra += 1;
        }
        if extra > 0 {
            return Err(de::Error::invalid_length(3 + extra, &self));
        }

        Ok(LocatedCompartment::new(cell_id, section_id, offset))
    }
}
