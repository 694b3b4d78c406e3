//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `notes` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every statement binds its values, ids included.
//! - "No matching row" is reported as `false` / empty cursor, never an error.

use crate::db::DbResult;
use crate::model::note::NoteId;
use crate::repo::cursor::{NoteCursor, CURSOR_PAGE_SIZE};
use rusqlite::{params, Connection};

/// Repository interface for note CRUD operations.
pub trait NoteRepository<'conn> {
    /// Inserts one note and returns its assigned row id.
    fn create_note(&self, title: &str, body: &str) -> DbResult<NoteId>;
    /// Overwrites title/body; `true` iff a row was changed.
    fn update_note(&self, id: NoteId, title: &str, body: &str) -> DbResult<bool>;
    /// Hard-deletes one note; `true` iff a row was removed.
    fn delete_note(&self, id: NoteId) -> DbResult<bool>;
    /// Lazy cursor over every stored note.
    fn fetch_all_notes(&self) -> DbResult<NoteCursor<'conn>>;
    /// Cursor positioned at the note with `id`, empty when absent.
    fn fetch_note(&self, id: NoteId) -> DbResult<NoteCursor<'conn>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
    page_size: u32,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a connection whose schema is already initialized.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            page_size: CURSOR_PAGE_SIZE,
        }
    }

    /// Overrides how many rows a full-table cursor loads per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

impl<'conn> NoteRepository<'conn> for SqliteNoteRepository<'conn> {
    fn create_note(&self, title: &str, body: &str) -> DbResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (title, body) VALUES (?1, ?2);",
            params![title, body],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_note(&self, id: NoteId, title: &str, body: &str) -> DbResult<bool> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                body = ?3
             WHERE _id = ?1;",
            params![id, title, body],
        )?;
        Ok(changed > 0)
    }

    fn delete_note(&self, id: NoteId) -> DbResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE _id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn fetch_all_notes(&self) -> DbResult<NoteCursor<'conn>> {
        Ok(NoteCursor::all(self.conn, self.page_size))
    }

    fn fetch_note(&self, id: NoteId) -> DbResult<NoteCursor<'conn>> {
        NoteCursor::single(self.conn, id)
    }
}
