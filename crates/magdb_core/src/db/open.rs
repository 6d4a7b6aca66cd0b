//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Apply the schema before returning a usable gateway.
//!
//! # Invariants
//! - Returned gateways have `foreign_keys=ON`.
//! - Returned gateways have every required table and column.

use super::gateway::StorageGateway;
use super::schema::apply_schema;
use super::SchemaResult;
use crate::config::DbLocation;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies the schema.
///
/// # Side effects
/// - Creates the file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> SchemaResult<StorageGateway> {
    let path = path.as_ref();
    let location = DbLocation::File(path.to_path_buf());
    bootstrap(location, || Connection::open(path))
}

/// Opens a private in-memory database and applies the schema.
///
/// Each call yields an isolated store, which is what tests rely on.
pub fn open_db_in_memory() -> SchemaResult<StorageGateway> {
    bootstrap(DbLocation::Memory, Connection::open_in_memory)
}

fn bootstrap(
    location: DbLocation,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> SchemaResult<StorageGateway> {
    let started_at = Instant::now();
    let mode = location.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match connect() {
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

    match configure_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(StorageGateway::from_connection(conn, location))
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

fn configure_connection(conn: &Connection) -> SchemaResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_schema(conn)?;
    Ok(())
}
