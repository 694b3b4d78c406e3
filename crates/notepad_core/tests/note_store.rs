use notepad_core::{Note, NoteStore, StoreConfig, StoreError, StoreLocation};
use rusqlite::Connection;
use std::collections::BTreeMap;

fn open_memory_store() -> NoteStore {
    let mut store = NoteStore::new(StoreConfig::in_memory());
    store.open().unwrap();
    store
}

#[test]
fn create_then_fetch_returns_same_title_and_body() {
    let store = open_memory_store();

    let id = store.create_note("Groceries", "Milk, eggs").unwrap();
    assert_eq!(id, 1);

    let mut cursor = store.fetch_note(id).unwrap();
    let note = cursor.next().unwrap().unwrap();
    assert_eq!(note, Note::new(1, "Groceries", "Milk, eggs"));
    assert!(cursor.next().is_none());
}

#[test]
fn ids_are_monotonic_and_never_reused() {
    let store = open_memory_store();

    let first = store.create_note("one", "1").unwrap();
    let second = store.create_note("two", "2").unwrap();
    assert!(store.delete_note(second).unwrap());
    let third = store.create_note("three", "3").unwrap();

    assert!(first >= 0);
    assert!(second > first);
    assert!(third > second);
}

#[test]
fn delete_removes_row_and_reports_missing_ids() {
    let store = open_memory_store();
    let a = store.create_note("A", "B").unwrap();
    let c = store.create_note("C", "D").unwrap();
    assert_eq!((a, c), (1, 2));

    assert!(store.delete_note(a).unwrap());
    assert!(store.fetch_note(a).unwrap().next().is_none());
    assert!(!store.delete_note(a).unwrap());

    let remaining = store.fetch_all_notes().unwrap().into_notes().unwrap();
    assert_eq!(remaining, vec![Note::new(2, "C", "D")]);
}

#[test]
fn update_existing_note_is_visible() {
    let store = open_memory_store();
    let id = store.create_note("draft", "todo").unwrap();

    assert!(store.update_note(id, "final", "done").unwrap());
    let note = store.get_note(id).unwrap().unwrap();
    assert_eq!(note.title, "final");
    assert_eq!(note.body, "done");
}

#[test]
fn update_missing_note_returns_false_and_mutates_nothing() {
    let store = open_memory_store();
    assert!(!store.update_note(99, "X", "Y").unwrap());

    let id = store.create_note("keep", "me").unwrap();
    assert!(!store.update_note(id + 1, "X", "Y").unwrap());
    assert_eq!(store.get_note(id).unwrap(), Some(Note::new(id, "keep", "me")));
}

#[test]
fn fetch_all_returns_exactly_live_notes() {
    let store = open_memory_store();
    let mut expected = BTreeMap::new();
    for idx in 0..150 {
        let title = format!("title {idx}");
        let body = format!("body {idx}");
        let id = store.create_note(&title, &body).unwrap();
        expected.insert(id, (title, body));
    }
    for id in [3, 64, 65, 128] {
        assert!(store.delete_note(id).unwrap());
        expected.remove(&id);
    }

    let listed: BTreeMap<_, _> = store
        .fetch_all_notes()
        .unwrap()
        .map(|note| {
            let note = note.unwrap();
            (note.id, (note.title, note.body))
        })
        .collect();
    assert_eq!(listed, expected);
}

#[test]
fn duplicate_titles_and_empty_text_are_allowed() {
    let store = open_memory_store();
    let first = store.create_note("same", "").unwrap();
    let second = store.create_note("same", "").unwrap();
    assert_ne!(first, second);
    assert_eq!(store.get_note(second).unwrap().unwrap().body, "");
}

#[test]
fn values_are_bound_not_interpolated() {
    let store = open_memory_store();
    let hostile = "x'); DROP TABLE notes; --";
    let id = store.create_note(hostile, hostile).unwrap();
    assert_eq!(store.get_note(id).unwrap().unwrap().title, hostile);
    assert_eq!(store.fetch_all_notes().unwrap().count(), 1);
}

#[test]
fn get_note_on_missing_id_is_none() {
    let store = open_memory_store();
    assert_eq!(store.get_note(5).unwrap(), None);
}

#[test]
fn operations_on_closed_store_fail_with_not_open() {
    let store = NoteStore::new(StoreConfig::in_memory());
    assert!(matches!(
        store.create_note("a", "b").unwrap_err(),
        StoreError::NotOpen
    ));
    assert!(matches!(store.delete_note(1).unwrap_err(), StoreError::NotOpen));
    assert!(matches!(
        store.update_note(1, "a", "b").unwrap_err(),
        StoreError::NotOpen
    ));
    assert!(matches!(store.fetch_all_notes().err(), Some(StoreError::NotOpen)));
    assert!(matches!(store.fetch_note(1).err(), Some(StoreError::NotOpen)));
}

#[test]
fn open_twice_fails_fast_and_close_is_idempotent() {
    let mut store = NoteStore::new(StoreConfig::in_memory());
    store.close().unwrap();

    store.open().unwrap();
    assert!(matches!(store.open().err(), Some(StoreError::AlreadyOpen)));
    assert!(store.is_open());

    store.close().unwrap();
    store.close().unwrap();
    assert!(!store.is_open());
}

#[test]
fn open_returns_self_for_chaining() {
    let mut store = NoteStore::new(StoreConfig::in_memory());
    let id = store.open().unwrap().create_note("chained", "call").unwrap();
    assert_eq!(id, 1);
}

#[test]
fn fetch_note_surfaces_query_failure_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());
    let mut store = NoteStore::new(config.clone());
    store.open().unwrap();
    store.create_note("doomed", "row").unwrap();

    let StoreLocation::File(path) = &config.location else {
        panic!("expected file-backed config");
    };
    let other = Connection::open(path).unwrap();
    other.execute_batch("DROP TABLE notes;").unwrap();
    drop(other);

    assert!(matches!(store.fetch_note(1).err(), Some(StoreError::Db(_))));
    assert!(matches!(store.get_note(1).unwrap_err(), StoreError::Db(_)));
}
