//! Key-value storage port and its implementations.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract every store is built on.
//! - Provide a durable SQLite backend and an in-memory backend.
//! - Own JSON blob encoding/decoding shared by the typed stores.
//!
//! # Invariants
//! - `set` replaces the whole value for a key in one statement.
//! - Corrupt blobs decode as the empty value and are logged, never returned
//!   as errors.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Uploaded question bank (JSON array of questions).
pub const BANK_KEY: &str = "digitalSocietyQuestionBank";
/// Exam id -> exam answers.
pub const EXAM_RESPONSES_KEY: &str = "questionBankExamResponses";
/// Quiz id -> quiz entry.
pub const QUIZ_RESPONSES_KEY: &str = "questionBankQuizResponses";
/// `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";
/// Session-scoped: questions of the quiz generated last.
pub const HANDOFF_QUESTIONS_KEY: &str = "customQuiz";
/// Session-scoped: config of the quiz generated last.
pub const HANDOFF_CONFIG_KEY: &str = "quizConfig";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage transport or encoding failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode stored value: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed blob storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// SQLite-backed durable store over the `kv_entries` table.
///
/// Owns its connection behind a mutex so one store can be shared with the
/// autosave task.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::from_connection)
    }

    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::from_connection)
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn().execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn()
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-process store. Backs session-scoped handoff data and tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Reads and decodes a JSON blob for display.
///
/// Missing keys, transport failures and corrupt content all yield
/// `T::default()`; the latter two are logged with `error_code`.
pub(crate) fn read_json_blob<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match try_read_json_blob(store, key) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=blob_read module=repo status=error key={} error_code=blob_read_failed error={}",
                key, err
            );
            T::default()
        }
    }
}

/// Reads a JSON blob ahead of a read-modify-write.
///
/// Transport failures are returned so the caller never overwrites a blob it
/// could not read. Corrupt content still decodes as `T::default()`.
pub(crate) fn try_read_json_blob<T, S>(store: &S, key: &str) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(
                "event=blob_read module=repo status=error key={} error_code=blob_parse_failed error={}",
                key, err
            );
            Ok(T::default())
        }
    }
}

/// Encodes and writes a JSON blob in a single `set`.
pub(crate) fn write_json_blob<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(StoreError::Serialize)?;
    store.set(key, &encoded)
}
