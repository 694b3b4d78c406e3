//! Domain model for stored notes.
//!
//! # Invariants
//! - Every note is identified by a store-assigned `NoteId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod note;
