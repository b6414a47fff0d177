use taskpad_core::storage::migrations::latest_version;
use taskpad_core::{open_store, open_store_in_memory, KvStore, TaskStore, TASKS_KV_KEY};

#[test]
fn in_memory_store_opens_with_latest_schema() {
    let kv = open_store_in_memory().unwrap();
    // A usable store answers reads immediately after open.
    assert_eq!(kv.get(TASKS_KV_KEY).unwrap(), None);
    assert!(latest_version() >= 1);
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad_store.sqlite3");

    {
        let kv = open_store(&path).unwrap();
        kv.set(TASKS_KV_KEY, r#"[]"#).unwrap();
    }

    let kv = open_store(&path).unwrap();
    assert_eq!(kv.get(TASKS_KV_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn task_list_survives_reopen_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad_store.sqlite3");

    let key = {
        let kv = open_store(&path).unwrap();
        let mut store = TaskStore::new(kv);
        store.load();
        let key = store.create("persisted", "across sessions").unwrap().key;
        store.toggle_completion(key);
        key
    };

    let kv = open_store(&path).unwrap();
    let mut store = TaskStore::new(kv);
    store.load();
    assert_eq!(store.len(), 1);
    let task = store.get(key).unwrap();
    assert_eq!(task.title, "persisted");
    assert_eq!(task.details, "across sessions");
    assert!(task.completed);
}

#[test]
fn end_to_end_scenario_from_empty_storage() {
    let kv = open_store_in_memory().unwrap();
    let mut store = TaskStore::new(kv);

    store.load();
    assert!(store.is_empty());

    let a = store.create("A", "").unwrap().key;
    let b = store.create("B", "x").unwrap().key;
    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[0].title, "A");
    assert_eq!(store.tasks()[0].details, "");
    assert!(!store.tasks()[0].completed);
    assert_eq!(store.tasks()[1].title, "B");
    assert_eq!(store.tasks()[1].details, "x");
    assert!(!store.tasks()[1].completed);

    store.toggle_completion(a);

    let view = store.search("a");
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].key, a);
    assert_eq!(view[0].title, "A");
    assert!(view[0].completed);
    assert_ne!(view[0].key, b);
}
