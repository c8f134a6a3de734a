//! Named compartment sets loaded from a single JSON document.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::collection::{CollectionRecord, CompartmentCollection};
use crate::config::ParseConfig;
use crate::error::{CompartmentError, CompartmentResult};

/// Compartment sets keyed by name, in document order.
///
/// Names are unique; a document that repeats a name is rejected.
/// Enumeration follows insertion order, while equality compares the
/// name-to-collection mapping regardless of order.
///
/// # Example
///
/// ```rust
/// use compartment_sets::CompartmentCollectionRegistry;
///
/// let sets = CompartmentCollectionRegistry::from_json(r#"{
///     "cs1": {"population": "pop1", "compartment_set": [[0, 10, 0.1]]},
///     "cs0": {"population": "pop0", "compartment_set": []}
/// }"#).unwrap();
///
/// assert_eq!(sets.names().collect::<Vec<_>>(), vec!["cs1", "cs0"]);
/// assert!(sets.contains("cs0"));
/// assert_eq!(sets.get("cs1").unwrap().population(), "pop1");
/// assert!(sets.get("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompartmentCollectionRegistry {
    collections: IndexMap<String, CompartmentCollection>,
}

impl CompartmentCollectionRegistry {
    /// Parses a registry from JSON text with the default [`ParseConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::Format`] if the top level is not an
    /// object, a member is not a valid compartment set, or a name repeats.
    pub fn from_json(content: &str) -> CompartmentResult<Self> {
        Self::from_json_with_config(content, &ParseConfig::default())
    }

    /// Parses a registry from JSON text, applying the checks in `config` to
    /// every member.
    pub fn from_json_with_config(content: &str, config: &ParseConfig) -> CompartmentResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(content);
        let registry = Deserializer::deserialize_map(&mut deserializer, RegistryVisitor { config })?;
        deserializer.end()?;
        debug!(collections = registry.len(), "parsed compartment sets");
        Ok(registry)
    }

    /// Reads and parses a registry file with the default [`ParseConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::Io`] if the file cannot be read and
    /// [`CompartmentError::Format`] if its content is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CompartmentResult<Self> {
        Self::from_file_with_config(path, &ParseConfig::default())
    }

    /// Reads and parses a registry file, applying the checks in `config`.
    pub fn from_file_with_config<P: AsRef<Path>>(
        path: P,
        config: &ParseConfig,
    ) -> CompartmentResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CompartmentError::io_error(path, e))?;
        let registry = Self::from_json_with_config(&content, config)?;
        info!(
            path = %path.display(),
            collections = registry.len(),
            "loaded compartment sets"
        );
        Ok(registry)
    }

    /// Returns the collection stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::KeyNotFound`] if there is none.
    pub fn get(&self, name: &str) -> CompartmentResult<&CompartmentCollection> {
        self.collections
            .get(name)
            .ok_or_else(|| CompartmentError::KeyNotFound(name.to_string()))
    }

    /// Returns true if a collection is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Number of collections.
    #[inline]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Returns true if there are no collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Collection names in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.collections.keys().map(String::as_str)
    }

    /// Collections in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &CompartmentCollection> + '_ {
        self.collections.values()
    }

    /// `(name, collection)` pairs in insertion order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = (&str, &CompartmentCollection)> + '_ {
        self.collections
            .iter()
            .map(|(name, collection)| (name.as_str(), collection))
    }

    /// Serializes every collection to a single JSON object, names in
    /// insertion order.
    pub fn to_json(&self) -> CompartmentResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for CompartmentCollectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompartmentSets({{")?;
        for (i, (name, collection)) in self.collections.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", name, collection)?;
        }
        write!(f, "}})")
    }
}

impl<'a> IntoIterator for &'a CompartmentCollectionRegistry {
    type Item = (&'a String, &'a CompartmentCollection);
    type IntoIter = indexmap::map::Iter<'a, String, CompartmentCollection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

impl<'de> Deserialize<'de> for CompartmentCollectionRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = ParseConfig::default();
        deserializer.deserialize_map(RegistryVisitor { config: &config })
    }
}

struct RegistryVisitor<'c> {
    config: &'c ParseConfig,
}

impl<'de> Visitor<'de> for RegistryVisitor<'_> {
    type Value = CompartmentCollectionRegistry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping compartment set names to compartment sets")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut collections = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(name) = map.next_key::<String>()? {
            if collections.contains_key(&name) {
                return Err(de::Error::custom(format!(
                    "duplicate compartment set name '{}'",
                    name
                )));
            }
            let record: CollectionRecord = map.next_value()?;
            let collection = record.into_collection(self.config).map_err(|e| {
                <A::Error as de::Error>::custom(format!("compartment set '{}': {}", name, e))
            })?;
            collections.insert(name, collection);
        }
        Ok(CompartmentCollectionRegistry { collections })
    }
}
