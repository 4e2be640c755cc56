//! Integration test: store scenarios through the facade.
//!
//! Element IDs across directories, path round trips, type tag fidelity
//! and the behaviour of lookups that miss.

use crescent::prelude::*;

#[test]
fn sun_and_earth() {
    let mut store = Store::new();
    let sun = store.create::<f64>("root/orbital/sun/mass");
    let earth = store.create::<f64>("root/orbital/earth/mass");
    assert_eq!(sun, ElementId(0));
    assert_eq!(earth, ElementId(1));

    *store.load::<f64>(sun) = 1.989e30;
    *store.load::<f64>(earth) = 5.972e24;

    assert_eq!(store.lookup("root/orbital/earth/mass"), Ok(earth));
    assert_eq!(*store.read::<f64>(sun), 1.989e30);
    assert_eq!(
        store.root().lookup("orbital").unwrap().list_subdirs(),
        ["sun", "earth"]
    );
}

#[test]
fn directory_views_agree_with_store() {
    let mut store = Store::new();
    let id = store.create::<f64>("root/orbital/earth/mass");

    let earth = store.root().lookup("orbital/earth").unwrap();
    assert!(earth.list_elements().contains(&"mass"));
    assert_eq!(earth.get_element_id("mass"), Some(id));
    assert_eq!(earth.path(), "root/orbital/earth");
    assert_eq!(earth.parent().map(|d| d.name()), Some("orbital"));
}

#[test]
fn every_kind_reports_its_tag() {
    let mut store = Store::new();
    let mut dir = store.root_mut().subdir("kinds");
    let ids = [
        (dir.create_element::<bool>("a"), TypeTag::Bool),
        (dir.create_element::<i8>("b"), TypeTag::Char),
        (dir.create_element::<i16>("c"), TypeTag::Int16),
        (dir.create_element::<i32>("d"), TypeTag::Int32),
        (dir.create_element::<i64>("e"), TypeTag::Int64),
        (dir.create_element::<u8>("f"), TypeTag::UChar),
        (dir.create_element::<u16>("g"), TypeTag::UInt16),
        (dir.create_element::<u32>("h"), TypeTag::UInt32),
        (dir.create_element::<u64>("i"), TypeTag::UInt64),
        (dir.create_element::<f32>("j"), TypeTag::Float),
        (dir.create_element::<f64>("k"), TypeTag::Double),
        (dir.create_element::<String>("l"), TypeTag::String),
    ];
    for (id, tag) in ids {
        assert_eq!(store.get_type(id), Some(tag));
        assert_eq!(store.value(id).map(Value::tag), Some(tag));
    }
}

#[test]
fn missing_paths_are_reported_not_created() {
    let mut store = Store::new();
    store.create::<u8>("root/cm/mode");
    assert!(matches!(
        store.lookup("root/missing/path"),
        Err(StoreError::NotFound { .. })
    ));
    assert!(store.root().lookup("missing").is_none());
    assert_eq!(store.root().list_subdirs(), ["cm"]);
}

#[test]
#[should_panic(expected = "requested as float")]
fn wrong_kind_load_panics() {
    let mut store = Store::new();
    let id = store.create::<f64>("root/x");
    let _ = store.load::<f32>(id);
}

#[test]
fn checked_access_reports_mismatch() {
    let mut store = Store::new();
    let id = store.create::<f64>("root/x");
    assert!(matches!(
        store.try_load::<f32>(id),
        Err(AccessError::TypeMismatch { .. })
    ));
}
