//! Forward-only read view over `notes` rows.
//!
//! # Responsibility
//! - Stream rows lazily instead of materializing the whole table.
//! - Release its resources when dropped or closed.
//!
//! # Invariants
//! - Rows are loaded in keyset pages (`_id > last_seen`), so a page never
//!   holds a statement open between `next()` calls.
//! - Once exhausted or failed, the cursor yields `None` forever.
//! - A page that fails partway is discarded whole: rows it had already read
//!   are dropped and only the error is yielded.
//! - Writes made while iterating may or may not be observed.

use crate::db::DbResult;
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, Row};
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Rows fetched per page by a full-table cursor.
pub const CURSOR_PAGE_SIZE: u32 = 64;

const PAGE_SQL: &str = "SELECT _id, title, body
FROM notes
WHERE _id > ?1
ORDER BY _id ASC
LIMIT ?2;";

const SINGLE_SQL: &str = "SELECT _id, title, body
FROM notes
WHERE _id = ?1;";

/// Caller-owned cursor over note rows.
///
/// Borrows the store connection, so it cannot outlive the open store.
pub struct NoteCursor<'conn> {
    conn: &'conn Connection,
    buffered: VecDeque<Note>,
    last_id: NoteId,
    page_size: u32,
    exhausted: bool,
}

impl<'conn> NoteCursor<'conn> {
    /// Cursor over every row, loaded `page_size` rows at a time.
    ///
    /// Nothing is queried until the first `next()`.
    pub fn all(conn: &'conn Connection, page_size: u32) -> Self {
        Self {
            conn,
            buffered: VecDeque::new(),
            last_id: 0,
            page_size: page_size.max(1),
            exhausted: false,
        }
    }

    /// Cursor positioned at the row with `id`.
    ///
    /// The lookup runs eagerly so query failures surface here. A missing id
    /// yields an empty cursor.
    pub fn single(conn: &'conn Connection, id: NoteId) -> DbResult<Self> {
        let mut stmt = conn.prepare_cached(SINGLE_SQL)?;
        let mut rows = stmt.query([id])?;
        let mut buffered = VecDeque::with_capacity(1);
        if let Some(row) = rows.next()? {
            buffered.push_back(parse_note_row(row)?);
        }

        Ok(Self {
            conn,
            buffered,
            last_id: id,
            page_size: 1,
            exhausted: true,
        })
    }

    /// Drains the remaining rows into a vector.
    pub fn into_notes(self) -> DbResult<Vec<Note>> {
        self.collect()
    }

    /// Releases the cursor explicitly. Equivalent to dropping it.
    pub fn close(self) {}

    fn load_page(&mut self) -> DbResult<()> {
        let conn = self.conn;
        let mut stmt = conn.prepare_cached(PAGE_SQL)?;
        let mut rows = stmt.query(params![self.last_id, i64::from(self.page_size)])?;
        let mut loaded = 0u32;
        while let Some(row) = rows.next()? {
            let note = parse_note_row(row)?;
            self.last_id = note.id;
            self.buffered.push_back(note);
            loaded += 1;
        }

        if loaded < self.page_size {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl Iterator for NoteCursor<'_> {
    type Item = DbResult<Note>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(note) = self.buffered.pop_front() {
            return Some(Ok(note));
        }
        if self.exhausted {
            return None;
        }

        if let Err(err) = self.load_page() {
            self.exhausted = true;
            self.buffered.clear();
            return Some(Err(err));
        }
        self.buffered.pop_front().map(Ok)
    }
}

impl FusedIterator for NoteCursor<'_> {}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("_id")?,
        title: row.get("title")?,
        body: row.get("body")?,
    })
}
