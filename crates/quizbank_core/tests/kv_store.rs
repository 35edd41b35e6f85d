use quizbank_core::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
use std::sync::Arc;

fn exercise_store(store: &dyn KeyValueStore) {
    assert_eq!(store.get("missing").unwrap(), None);

    store.set("theme", "light").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

    store.remove("theme").unwrap();
    assert_eq!(store.get("theme").unwrap(), None);

    store.remove("theme").unwrap();
}

#[test]
fn sqlite_store_gets_sets_and_removes() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    exercise_store(&store);
}

#[test]
fn memory_store_gets_sets_and_removes() {
    let store = MemoryKeyValueStore::new();
    exercise_store(&store);
    assert!(store.is_empty());
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizbank.sqlite3");

    let store = SqliteKeyValueStore::open(&path).unwrap();
    store.set("questionBankQuizResponses", "{}").unwrap();
    drop(store);

    let reopened = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("questionBankQuizResponses").unwrap().as_deref(),
        Some("{}")
    );
}

#[test]
fn shared_store_sees_writes_through_every_handle() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let writer = Arc::clone(&store);

    writer.set("customQuiz", "[]").unwrap();

    assert!(store.contains_key("customQuiz"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("customQuiz").unwrap().as_deref(), Some("[]"));
}
