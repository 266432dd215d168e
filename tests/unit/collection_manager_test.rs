//! Unit tests for the CollectionManager public API.

use std::collections::HashSet;
use std::rc::Rc;

use cinetrack::database::kv_store::COLLECTIONS_KEY;
use cinetrack::database::{KeyValueStore, MemoryStore};
use cinetrack::managers::collection_manager::{CollectionManager, CollectionManagerTrait};
use cinetrack::types::errors::CollectionError;
use rstest::rstest;

fn setup() -> (Rc<MemoryStore>, CollectionManager) {
    let store = Rc::new(MemoryStore::new());
    let mgr = CollectionManager::load(store.clone()).unwrap();
    (store, mgr)
}

#[test]
fn test_create_collection() {
    let (_store, mut mgr) = setup();
    let c = mgr.create("Weekend picks").unwrap();

    assert_eq!(c.name, "Weekend picks");
    assert!(c.title_ids.is_empty());
    assert!(!c.id.is_empty());
    assert_eq!(mgr.list().len(), 1);
    assert_eq!(mgr.get(&c.id), Some(&c));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn test_create_rejects_blank_names(#[case] name: &str) {
    let (_store, mut mgr) = setup();
    assert!(matches!(mgr.create(name), Err(CollectionError::EmptyName)));
    assert!(mgr.list().is_empty());
}

#[test]
fn test_ids_are_unique_and_appended_in_order() {
    let (_store, mut mgr) = setup();
    let ids: Vec<String> = (0..50)
        .map(|i| mgr.create(&format!("List {}", i)).unwrap().id)
        .collect();

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    let names: Vec<&str> = mgr.list().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"List 0"));
    assert_eq!(names.last(), Some(&"List 49"));
}

#[test]
fn test_delete_collection() {
    let (_store, mut mgr) = setup();
    let keep = mgr.create("Keep").unwrap();
    let gone = mgr.create("Drop").unwrap();

    assert!(mgr.delete(&gone.id).unwrap());
    assert!(mgr.get(&gone.id).is_none());
    assert!(mgr.get(&keep.id).is_some());
    assert!(!mgr.delete(&gone.id).unwrap());
}

#[test]
fn test_delete_unknown_is_noop() {
    let (store, mut mgr) = setup();
    assert!(!mgr.delete("nope").unwrap());
    assert!(store.is_empty());
}

#[test]
fn test_rename() {
    let (_store, mut mgr) = setup();
    let c = mgr.create("Old").unwrap();
    assert!(mgr.rename(&c.id, " New ").unwrap());
    assert_eq!(mgr.get(&c.id).unwrap().name, "New");
    assert!(matches!(mgr.rename(&c.id, " "), Err(CollectionError::EmptyName)));
    assert!(!mgr.rename("missing", "Name").unwrap());
}

#[test]
fn test_add_title_uses_set_semantics() {
    let (_store, mut mgr) = setup();
    let c = mgr.create("Nolan").unwrap();

    assert!(mgr.add_title(&c.id, 27205).unwrap());
    assert!(mgr.add_title(&c.id, 157336).unwrap());
    assert!(!mgr.add_title(&c.id, 27205).unwrap());

    assert_eq!(mgr.get(&c.id).unwrap().title_ids, vec![27205, 157336]);
}

#[test]
fn test_remove_title() {
    let (_store, mut mgr) = setup();
    let c = mgr.create("Nolan").unwrap();
    mgr.add_title(&c.id, 1).unwrap();
    mgr.add_title(&c.id, 2).unwrap();

    assert!(mgr.remove_title(&c.id, 1).unwrap());
    assert!(!mgr.remove_title(&c.id, 1).unwrap());
    assert_eq!(mgr.get(&c.id).unwrap().title_ids, vec![2]);
}

#[test]
fn test_membership_ops_on_unknown_collection_are_noops() {
    let (_store, mut mgr) = setup();
    assert!(!mgr.add_title("ghost", 1).unwrap());
    assert!(!mgr.remove_title("ghost", 1).unwrap());
}

#[test]
fn test_containing() {
    let (_store, mut mgr) = setup();
    let a = mgr.create("A").unwrap();
    let b = mgr.create("B").unwrap();
    mgr.add_title(&a.id, 7).unwrap();
    mgr.add_title(&b.id, 7).unwrap();
    mgr.add_title(&b.id, 8).unwrap();

    assert_eq!(mgr.containing(7).len(), 2);
    assert_eq!(mgr.containing(8)[0].id, b.id);
    assert!(mgr.containing(9).is_empty());
}

#[test]
fn test_collections_persist_across_reload() {
    let store = Rc::new(MemoryStore::new());
    let id = {
        let mut mgr = CollectionManager::load(store.clone()).unwrap();
        let c = mgr.create("Horror").unwrap();
        mgr.add_title(&c.id, 694).unwrap();
        c.id
    };

    let mgr = CollectionManager::load(store).unwrap();
    let c = mgr.get(&id).unwrap();
    assert_eq!(c.name, "Horror");
    assert_eq!(c.title_ids, vec![694]);
}

#[test]
fn test_malformed_record_loads_empty() {
    let store = Rc::new(MemoryStore::new());
    store.set(COLLECTIONS_KEY, "[{\"id\":").unwrap();
    let mgr = CollectionManager::load(store).unwrap();
    assert!(mgr.list().is_empty());
}
