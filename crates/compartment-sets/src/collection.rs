//! A population-scoped, ordered set of compartment locations.

use std::fmt;

use cell_ranges::RangeSet;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

use crate::config::ParseConfig;
use crate::error::{CompartmentError, CompartmentResult};
use crate::location::LocatedCompartment;

/// An ordered list of compartment locations belonging to one population.
///
/// Entries keep the order and multiplicity they were parsed with; nothing is
/// sorted or deduplicated, and equality is order- and duplicate-sensitive.
/// Collections are immutable: [`filter`](Self::filter) builds a new one.
///
/// # Example
///
/// ```rust
/// use compartment_sets::{CompartmentCollection, RangeSet};
///
/// let cs = CompartmentCollection::from_json(r#"{
///     "population": "pop0",
///     "compartment_set": [[1, 10, 0.5], [2, 20, 0.25], [3, 30, 0.75], [2, 20, 0.25]]
/// }"#).unwrap();
///
/// assert_eq!(cs.len(), 4);
/// assert_eq!(cs.get(-1).unwrap().cell_id(), 2);
///
/// let subset = RangeSet::from_values([1, 2]).unwrap();
/// assert_eq!(cs.size_in(&subset), 3);
/// assert_eq!(cs.filter(Some(&subset)).len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompartmentCollection {
    population: String,
    #[serde(rename = "compartment_set")]
    entries: Vec<LocatedCompartment>,
}

impl CompartmentCollection {
    pub(crate) fn new(population: String, entries: Vec<LocatedCompartment>) -> Self {
        Self {
            population,
            entries,
        }
    }

    /// Parses a collection from JSON text with the default [`ParseConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::Format`] if the text is not an object
    /// with a string `population` and an array `compartment_set` of
    /// `[cell_id, section_id, offset]` triples.
    pub fn from_json(content: &str) -> CompartmentResult<Self> {
        Self::from_json_with_config(content, &ParseConfig::default())
    }

    /// Parses a collection from JSON text, applying the checks in `config`.
    pub fn from_json_with_config(content: &str, config: &ParseConfig) -> CompartmentResult<Self> {
        let record: CollectionRecord = serde_json::from_str(content)?;
        let collection = record.into_collection(config)?;
        debug!(
            population = %collection.population,
            entries = collection.entries.len(),
            "parsed compartment set"
        );
        Ok(collection)
    }

    /// Population label.
    pub fn population(&self) -> &str {
        &self.population
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries whose cell id is in `subset`.
    pub fn size_in(&self, subset: &RangeSet) -> usize {
        self.filtered_iter(subset).count()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`, where negative values count back from
    /// the end (`-1` is the last entry).
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::IndexOutOfRange`] unless
    /// `-len <= index < len`.
    pub fn get(&self, index: isize) -> CompartmentResult<&LocatedCompartment> {
        let len = self.entries.len();
        let resolved = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        resolved
            .and_then(|i| self.entries.get(i))
            .ok_or(CompartmentError::IndexOutOfRange { index, len })
    }

    /// All entries in stored order.
    pub fn entries(&self) -> &[LocatedCompartment] {
        &self.entries
    }

    /// Iterates over all entries in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocatedCompartment> {
        self.entries.iter()
    }

    /// Iterates lazily over the entries whose cell id is in `subset`,
    /// keeping their relative order.
    pub fn filtered_iter<'a>(&'a self, subset: &'a RangeSet) -> FilteredIter<'a> {
        FilteredIter {
            entries: self.entries.iter(),
            subset,
        }
    }

    /// Returns the distinct cell ids referenced by the entries.
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::RangeSet`] if an entry uses cell id
    /// `u64::MAX`.
    pub fn node_ids(&self) -> CompartmentResult<RangeSet> {
        let ids = RangeSet::from_values(self.entries.iter().map(LocatedCompartment::cell_id))?;
        Ok(ids)
    }

    /// Returns a new collection with the same population holding only the
    /// entries whose cell id is in `subset`.
    ///
    /// `None` keeps every entry and returns an independent copy.
    pub fn filter(&self, subset: Option<&RangeSet>) -> CompartmentCollection {
        let Some(subset) = subset else {
            return self.clone();
        };
        let entries: Vec<LocatedCompartment> = self.filtered_iter(subset).copied().collect();
        trace!(
            population = %self.population,
            kept = entries.len(),
            total = self.entries.len(),
            "filtered compartment set"
        );
        Self::new(self.population.clone(), entries)
    }

    /// Serializes to the JSON shape accepted by [`from_json`](Self::from_json).
    pub fn to_json(&self) -> CompartmentResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for CompartmentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompartmentSet(population={:?}, compartment_set=[", self.population)?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "])")
    }
}

impl<'a> IntoIterator for &'a CompartmentCollection {
    type Item = &'a LocatedCompartment;
    type IntoIter = std::slice::Iter<'a, LocatedCompartment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lazy iterator over the entries of a [`CompartmentCollection`] whose cell
/// id is in a [`RangeSet`].
///
/// Created by [`CompartmentCollection::filtered_iter`].
#[derive(Debug, Clone)]
pub struct FilteredIter<'a> {
    entries: std::slice::Iter<'a, LocatedCompartment>,
    subset: &'a RangeSet,
}

impl<'a> Iterator for FilteredIter<'a> {
    type Item = &'a LocatedCompartment;

    fn next(&mut self) -> Option<Self::Item> {
        let subset = self.subset;
        self.entries.find(|entry| subset.contains(entry.cell_id()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}

impl std::iter::FusedIterator for FilteredIter<'_> {}

/// The JSON object form of a collection, before validation.
#[derive(Debug)]
pub(crate) struct CollectionRecord {
    population: String,
    compartment_set: Vec<LocatedCompartment>,
}

impl CollectionRecord {
    /// Applies the optional checks of `config` and builds the collection.
    pub(crate) fn into_collection(
        self,
        config: &ParseConfig,
    ) -> CompartmentResult<CompartmentCollection> {
        if config.check_offset_bounds {
            if let Some(bad) = self
                .compartment_set
                .iter()
                .find(|loc| !(0.0..=1.0).contains(&loc.offset()))
            {
                return Err(CompartmentError::format(format!(
                    "offset must be between 0 and 1 inclusive, got {:?} in {}",
                    bad.offset(),
                    bad
                )));
            }
        }
        if config.require_sorted {
            if let Some(pair) = self.compartment_set.windows(2).find(|w| w[1] <= w[0]) {
                return Err(CompartmentError::format(format!(
                    "'compartment_set' must be strictly sorted with no duplicates, found {} before {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(CompartmentCollection::new(
            self.population,
            self.compartment_set,
        ))
    }
}

impl<'de> Deserialize<'de> for CompartmentCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CollectionRecord::deserialize(deserializer)?
            .into_collection(&ParseConfig::default())
            .map_err(de::Error::custom)
    }
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "snake_case")]
enum Field {
    Population,
    CompartmentSet,
}

impl<'de> Deserialize<'de> for CollectionRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Accepts only a JSON object; arrays are rejected rather than read
/// positionally.
struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = CollectionRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with 'population' and 'compartment_set' keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut population: Option<String> = None;
        let mut compartment_set: Option<Vec<LocatedCompartment>> = None;
        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Population => {
                    if population.is_some() {
                        return Err(de::Error::duplicate_field("population"));
                    }
                    population = Some(map.next_value()?);
                }
                Field::CompartmentSet => {
                    if compartment_set.is_some() {
                        return Err(de::Error::duplicate_field("compartment_set"));
                    }
                    compartment_set = Some(map.next_value()?);
                }
            }
        }
        Ok(CollectionRecord {
            population: population.ok_or_else(|| de::Error::missing_field("population"))?,
            compartment_set: compartment_set
                .ok_or_else(|| de::Error::missing_field("compartment_set"))?,
        })
    }
}
