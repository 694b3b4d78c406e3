//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Bring the `notes` schema to the requested version before returning.
//!
//! # Invariants
//! - Returned connections have `init_schema` applied for `target_version`.
//! - Parent directories of a file database are created on demand.

use super::schema::{current_user_version, init_schema};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a SQLite database file and initializes its schema.
///
/// # Errors
/// - `DbError::Io` when the parent directory cannot be created.
/// - `DbError::Sqlite` when the file cannot be opened or bootstrapped.
/// - `DbError::UnsupportedSchemaVersion` when the file is newer than
///   `target_version`.
pub fn open_db(path: impl AsRef<Path>, target_version: u32) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_dir_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    }

    let opened = Connection::open(path);
    finish_open(opened, "file", target_version, started_at)
}

/// Opens an in-memory SQLite database and initializes its schema.
///
/// Contents vanish when the connection is dropped.
pub fn open_db_in_memory(target_version: u32) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");
    finish_open(
        Connection::open_in_memory(),
        "memory",
        target_version,
        started_at,
    )
}

fn finish_open(
    opened: rusqlite::Result<Connection>,
    mode: &str,
    target_version: u32,
    started_at: Instant,
) -> DbResult<Connection> {
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, target_version) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} schema_version={} duration_ms={}",
                mode,
                target_version,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, target_version: u32) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let current_version = current_user_version(conn)?;
    init_schema(conn, current_version, target_version)
}
