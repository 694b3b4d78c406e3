//! Notes storage core for the notepad app.
//! One SQLite table (`notes`) behind a lifecycle-scoped `NoteStore`.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use db::schema::SCHEMA_VERSION;
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use repo::cursor::NoteCursor;
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use store::{
    NoteStore, StoreConfig, StoreError, StoreLocation, StoreResult, DATABASE_FILE_NAME,
};
