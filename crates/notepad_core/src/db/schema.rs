//! `notes` table definition and version handling.
//!
//! # Responsibility
//! - Own the fixed `notes` DDL.
//! - Create the table on first open and recreate it on version bumps.
//!
//! # Invariants
//! - Recreation discards every row; there is no forward migration.
//! - The applied version is mirrored to `PRAGMA user_version` in the same
//!   transaction as the DDL.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

/// Schema version compiled into this crate.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_NOTES_SQL: &str = "CREATE TABLE notes (
    _id   INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body  TEXT NOT NULL
);";

const DROP_NOTES_SQL: &str = "DROP TABLE IF EXISTS notes;";

/// Outcome of one `init_schema` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    /// Stored version already matched; nothing ran.
    Unchanged,
    /// Fresh database; table created.
    Created,
    /// Older version found; table dropped and recreated empty.
    Recreated { from_version: u32 },
}

/// Brings `conn` from `current_version` to `target_version`.
///
/// - `0` creates the table.
/// - Lower than target drops and recreates the table, discarding data.
/// - Equal is a no-op.
/// - Higher than target is rejected.
/// - A target of `0` is rejected before anything runs.
pub fn init_schema(
    conn: &mut Connection,
    current_version: u32,
    target_version: u32,
) -> DbResult<()> {
    apply_schema(conn, current_version, target_version).map(|_| ())
}

/// Same as [`init_schema`] but reports what was done.
pub fn apply_schema(
    conn: &mut Connection,
    current_version: u32,
    target_version: u32,
) -> DbResult<SchemaAction> {
    if target_version == 0 {
        return Err(DbError::InvalidTargetVersion(target_version));
    }

    if current_version > target_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: target_version,
        });
    }

    if current_version == target_version {
        return Ok(SchemaAction::Unchanged);
    }

    let action = if current_version == 0 {
        SchemaAction::Created
    } else {
        warn!(
            "event=schema_recreate module=db status=start from_version={} to_version={} data_loss=true",
            current_version, target_version
        );
        SchemaAction::Recreated {
            from_version: current_version,
        }
    };

    let tx = conn.transaction()?;
    tx.execute_batch(DROP_NOTES_SQL)?;
    tx.execute_batch(CREATE_NOTES_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {target_version};"))?;
    tx.commit()?;

    info!(
        "event=schema_init module=db status=ok from_version={} to_version={}",
        current_version, target_version
    );
    Ok(action)
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
