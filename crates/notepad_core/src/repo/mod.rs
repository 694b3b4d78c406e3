//! Repository layer over the `notes` table.
//!
//! # Responsibility
//! - Define the data access contract used by `NoteStore`.
//! - Isolate SQLite query details from store lifecycle handling.

pub mod cursor;
pub mod note_repo;
