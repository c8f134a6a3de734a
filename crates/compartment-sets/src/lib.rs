//! # compartment-sets
//!
//! Named sets of neuron compartment locations, parsed from and serialized
//! to JSON.
//!
//! A compartment is identified by a cell id, a section id within that cell,
//! and a relative offset along the section. This crate provides:
//!
//! - [`LocatedCompartment`]: one `(cell_id, section_id, offset)` record with
//!   a total order
//! - [`CompartmentCollection`]: an ordered, duplicate-preserving list of
//!   locations for one population, queryable by a [`RangeSet`] of cell ids
//! - [`CompartmentCollectionRegistry`]: collections keyed by name, loaded
//!   from a JSON string or file
//!
//! ## Usage
//!
//! ```rust
//! use compartment_sets::{CompartmentCollectionRegistry, RangeSet};
//!
//! let sets = CompartmentCollectionRegistry::from_json(r#"{
//!     "soma_and_dend": {
//!         "population": "NodeA",
//!         "compartment_set": [[0, 0, 0.5], [0, 12, 0.25], [4, 3, 0.75]]
//!     }
//! }"#).unwrap();
//!
//! let cs = sets.get("soma_and_dend").unwrap();
//! assert_eq!(cs.population(), "NodeA");
//! assert_eq!(cs.node_ids().unwrap(), RangeSet::from_values([0, 4]).unwrap());
//!
//! let selection = RangeSet::from_values([0]).unwrap();
//! let on_cell_zero: Vec<_> = cs.filtered_iter(&selection).collect();
//! assert_eq!(on_cell_zero.len(), 2);
//! ```
//!
//! ## JSON Format
//!
//! | Shape | Example |
//! |-------|---------|
//! | Location | `[cell_id, section_id, offset]` |
//! | Collection | `{"population": "pop0", "compartment_set": [[1, 10, 0.5]]}` |
//! | Registry | `{"name": {"population": "pop0", "compartment_set": []}}` |
//!
//! Parsing is strict about structure and types. Offset bounds and entry
//! ordering are only checked when requested through [`ParseConfig`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod collection;
mod config;
mod error;
mod location;
mod registry;

pub use collection::{CompartmentCollection, FilteredIter};
pub use config::{ParseConfig, ParseConfigBuilder};
pub use error::{CompartmentError, CompartmentResult};
pub use location::LocatedCompartment;
pub use registry::CompartmentCollectionRegistry;

// Re-export commonly used types from dependencies for convenience
pub use cell_ranges::{CellId, RangeSet, RangeSetError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<CompartmentCollection> = None;
        let _: Option<CompartmentCollectionRegistry> = None;
        let _: Option<LocatedCompartment> = None;
        let _: Option<ParseConfig> = None;
        let _: Option<CompartmentResult<()>> = None;
    }

    #[test]
    fn test_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RangeSet>();
        assert_send_sync::<LocatedCompartment>();
        assert_send_sync::<CompartmentCollection>();
        assert_send_sync::<CompartmentCollectionRegistry>();
    }

    #[test]
    fn test_re_exports() {
        let _id: CellId = 42;
        let _ = RangeSet::from_values([1, 2, 3]);
    }
}
