//! Integration tests for loading compartment set registries from files.

use std::path::PathBuf;

use compartment_sets::{
    CompartmentCollection, CompartmentCollectionRegistry, CompartmentError, ParseConfig,
};
use tempfile::tempdir;

const FIXTURE_JSON: &str = r#"{
    "cs1": {
        "population": "pop1",
        "compartment_set": [
            [0, 10, 0.1],
            [0, 10, 0.2],
            [0, 10, 0.3],
            [2, 3, 0.1],
            [3, 6, 0.3]
        ]
    },
    "cs0": {
        "population": "pop0",
        "compartment_set": []
    }
}"#;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("compartment_sets.json")
}

#[test]
fn test_load_from_file() {
    let sets = CompartmentCollectionRegistry::from_file(fixture_path()).unwrap();

    assert_eq!(sets.len(), 2);
    assert!(!sets.is_empty());
    assert_eq!(sets.names().collect::<Vec<_>>(), vec!["cs1", "cs0"]);
    assert!(sets.get("cs0").unwrap().is_empty());
    assert_eq!(sets.get("cs1").unwrap().len(), 5);
}

#[test]
fn test_file_and_string_are_equal() {
    let from_file = CompartmentCollectionRegistry::from_file(fixture_path()).unwrap();
    let from_string = CompartmentCollectionRegistry::from_json(FIXTURE_JSON).unwrap();
    assert_eq!(from_file, from_string);

    let modified =
        CompartmentCollectionRegistry::from_json(&FIXTURE_JSON.replace("0.1]", "0.15]")).unwrap();
    assert_ne!(from_file, modified);
}

#[test]
fn test_membership_of_every_name() {
    let sets = CompartmentCollectionRegistry::from_file(fixture_path()).unwrap();
    for name in sets.names() {
        assert!(sets.contains(name));
        assert!(sets.get(name).is_ok());
    }
    assert!(!sets.contains("non_existing_key"));
    assert!(matches!(
        sets.get("non_existing_key"),
        Err(CompartmentError::KeyNotFound(_))
    ));
}

#[test]
fn test_names_values_items_agree() {
    let sets = CompartmentCollectionRegistry::from_file(fixture_path()).unwrap();
    let names: Vec<&str> = sets.names().collect();
    let values: Vec<&CompartmentCollection> = sets.values().collect();
    let items: Vec<(&str, &CompartmentCollection)> = sets.items().collect();

    assert_eq!(names.len(), values.len());
    assert_eq!(names.len(), items.len());
    for (name, value) in &items {
        assert!(names.contains(name));
        assert!(values.contains(value));
    }
}

#[test]
fn test_file_round_trip() {
    let sets = CompartmentCollectionRegistry::from_file(fixture_path()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("round_trip.json");
    std::fs::write(&path, sets.to_json().unwrap()).unwrap();

    let loaded = CompartmentCollectionRegistry::from_file(&path).unwrap();
    assert_eq!(loaded, sets);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");

    let err = CompartmentCollectionRegistry::from_file(&path).unwrap_err();
    match err {
        CompartmentError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {:?}", other),
    }
}

#[test]
fn test_invalid_file_content_is_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("invalid.json");
    std::fs::write(&path, r#"{"cs0": {"population": "pop0"}}"#).unwrap();

    let err = CompartmentCollectionRegistry::from_file(&path).unwrap_err();
    assert!(matches!(err, CompartmentError::Format { .. }));
}

#[test]
fn test_file_with_strict_config() {
    let strict = ParseConfig::strict();
    let sets = CompartmentCollectionRegistry::from_file_with_config(fixture_path(), &strict);
    assert!(sets.is_ok());

    let dir = tempdir().unwrap();
    let path = dir.path().join("unsorted.json");
    std::fs::write(
        &path,
        r#"{"cs0": {"population": "pop0", "compartment_set": [[1, 0, 0.5], [0, 0, 0.5]]}}"#,
    )
    .unwrap();

    assert!(CompartmentCollectionRegistry::from_file(&path).is_ok());
    assert!(matches!(
        CompartmentCollectionRegistry::from_file_with_config(&path, &strict),
        Err(CompartmentError::Format { .. })
    ));
}

#[test]
fn test_registry_shared_across_threads() {
    let sets = std::sync::Arc::new(CompartmentCollectionRegistry::from_json(FIXTURE_JSON).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sets = std::sync::Arc::clone(&sets);
            std::thread::spawn(move || sets.get("cs1").map(|cs| cs.len()).unwrap_or(0))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
}
