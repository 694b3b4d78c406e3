//! Lifecycle-scoped notes store.
//!
//! # Responsibility
//! - Own the single SQLite connection backing the `notes` table.
//! - Expose create/read/update/delete over that connection.
//!
//! # Invariants
//! - State is either closed (no connection) or open (one connection).
//! - `open` on an open store fails fast; `close` is idempotent.
//! - Dropping the store releases the connection on every exit path.
//! - Log events carry ids and counts only, never note text.

mod config;

pub use config::{StoreConfig, StoreLocation, DATABASE_FILE_NAME};

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::note::{Note, NoteId};
use crate::repo::cursor::NoteCursor;
use crate::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use log::{debug, error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store lifecycle and CRUD operations.
#[derive(Debug)]
pub enum StoreError {
    /// Operation requires an open store.
    NotOpen,
    /// `open` called on a store that is already open.
    AlreadyOpen,
    /// Storage-layer failure.
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "note store is not open"),
            Self::AlreadyOpen => write!(f, "note store is already open"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotOpen | Self::AlreadyOpen => None,
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

/// Notes store over one SQLite database.
///
/// ```no_run
/// use notepad_core::{NoteStore, StoreConfig};
///
/// let mut store = NoteStore::new(StoreConfig::in_dir("/tmp/notepad"));
/// store.open()?;
/// let id = store.create_note("Groceries", "Milk, eggs")?;
/// assert!(store.get_note(id)?.is_some());
/// store.close()?;
/// # Ok::<(), notepad_core::StoreError>(())
/// ```
pub struct NoteStore {
    config: StoreConfig,
    conn: Option<Connection>,
}

impl NoteStore {
    /// Creates a closed store. No file is touched until `open`.
    pub fn new(config: StoreConfig) -> Self {
        Self { config, conn: None }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Opens or creates the backing database and initializes its schema.
    ///
    /// Returns `self` so calls can be chained.
    ///
    /// # Errors
    /// - `StoreError::AlreadyOpen` when called twice without `close`.
    /// - `StoreError::Db` when the database cannot be opened, or its stored
    ///   schema version is newer than the configured one.
    pub fn open(&mut self) -> StoreResult<&mut Self> {
        if self.conn.is_some() {
            return Err(StoreError::AlreadyOpen);
        }

        let target_version = self.config.schema_version;
        let conn = match &self.config.location {
            StoreLocation::File(path) => open_db(path, target_version)?,
            StoreLocation::Memory => open_db_in_memory(target_version)?,
        };
        self.conn = Some(conn);
        info!(
            "event=store_open module=store status=ok schema_version={}",
            target_version
        );
        Ok(self)
    }

    /// Releases the connection. Closing a closed store is a no-op.
    ///
    /// The connection is released even when SQLite reports a close error.
    pub fn close(&mut self) -> StoreResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                error!(
                    "event=store_close module=store status=error error={}",
                    err
                );
                drop(conn);
                Err(err.into())
            }
        }
    }

    /// Inserts a note and returns its new, never-reused id.
    pub fn create_note(&self, title: &str, body: &str) -> StoreResult<NoteId> {
        let id = self.repo()?.create_note(title, body)?;
        debug!("event=note_create module=store status=ok id={}", id);
        Ok(id)
    }

    /// Deletes the note with `id`. Returns `false` when no row matched.
    pub fn delete_note(&self, id: NoteId) -> StoreResult<bool> {
        let deleted = self.repo()?.delete_note(id)?;
        debug!(
            "event=note_delete module=store status=ok id={} deleted={}",
            id, deleted
        );
        Ok(deleted)
    }

    /// Lazy cursor over every stored note. Order is unspecified.
    pub fn fetch_all_notes(&self) -> StoreResult<NoteCursor<'_>> {
        Ok(self.repo()?.fetch_all_notes()?)
    }

    /// Cursor positioned at the note with `id`; empty when absent.
    pub fn fetch_note(&self, id: NoteId) -> StoreResult<NoteCursor<'_>> {
        Ok(self.repo()?.fetch_note(id)?)
    }

    /// Typed lookup over [`NoteStore::fetch_note`].
    pub fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let mut cursor = self.fetch_note(id)?;
        Ok(cursor.next().transpose()?)
    }

    /// Overwrites title and body of the note with `id`.
    ///
    /// Returns `false` and changes nothing when no row matched.
    pub fn update_note(&self, id: NoteId, title: &str, body: &str) -> StoreResult<bool> {
        let updated = self.repo()?.update_note(id, title, body)?;
        debug!(
            "event=note_update module=store status=ok id={} updated={}",
            id, updated
        );
        Ok(updated)
    }

    fn repo(&self) -> StoreResult<SqliteNoteRepository<'_>> {
        self.conn
            .as_ref()
            .map(SqliteNoteRepository::new)
            .ok_or(StoreError::NotOpen)
    }
}
