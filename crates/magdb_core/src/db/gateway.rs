//! The storage gateway: one shared connection, two primitives.
//!
//! # Invariants
//! - At most one statement runs at a time (the connection sits behind a mutex).
//! - `last_insert_id` is read under the same lock as the insert it belongs to.
//! - Failures carry a compacted copy of the offending statement.

use super::row::SqlRow;
use super::schema::apply_schema;
use super::{open_db, open_db_in_memory, SchemaError, SchemaResult};
use crate::config::{DbLocation, StoreConfig};
use log::{debug, error};
use rusqlite::{Connection, ErrorCode, Params};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

const MAX_STATEMENT_CHARS: usize = 120;

pub type PersistResult<T> = Result<T, PersistenceError>;

/// Storage rejected a statement after local validation passed.
#[derive(Debug)]
pub enum PersistenceError {
    /// A `NOT NULL`, `UNIQUE` or foreign key constraint failed.
    Constraint {
        statement: String,
        source: rusqlite::Error,
    },
    /// Any other SQLite failure.
    Sqlite {
        statement: String,
        source: rusqlite::Error,
    },
    ConnectionPoisoned,
}

impl PersistenceError {
    fn from_sqlite(statement: &str, source: rusqlite::Error) -> Self {
        let statement = compact_statement(statement, MAX_STATEMENT_CHARS);
        if matches!(
            source.sqlite_error_code(),
            Some(ErrorCode::ConstraintViolation)
        ) {
            Self::Constraint { statement, source }
        } else {
            Self::Sqlite { statement, source }
        }
    }

    /// Whether this failure was a constraint violation.
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraint { statement, source } => {
                write!(f, "constraint violation in `{statement}`: {source}")
            }
            Self::Sqlite { statement, source } => {
                write!(f, "statement `{statement}` failed: {source}")
            }
            Self::ConnectionPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Constraint { source, .. } | Self::Sqlite { source, .. } => Some(source),
            Self::ConnectionPoisoned => None,
        }
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    /// Rows inserted, updated or deleted.
    pub changed: usize,
    /// Row id generated by the most recent successful insert on this connection.
    pub last_insert_id: i64,
}

/// Owner of the process-wide SQLite connection.
///
/// Repositories borrow the gateway; entities never see it.
#[derive(Debug)]
pub struct StorageGateway {
    conn: Mutex<Connection>,
    location: DbLocation,
}

impl StorageGateway {
    pub(crate) fn from_connection(conn: Connection, location: DbLocation) -> Self {
        Self {
            conn: Mutex::new(conn),
            location,
        }
    }

    /// Opens the configured store and applies the schema.
    pub fn open(config: &StoreConfig) -> SchemaResult<Self> {
        match &config.location {
            DbLocation::File(path) => open_db(path),
            DbLocation::Memory => open_db_in_memory(),
        }
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    /// Creates the three tables if absent. Safe to call any number of times.
    pub fn initialize_schema(&self) -> SchemaResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| SchemaError::ConnectionPoisoned)?;
        apply_schema(&conn)
    }

    /// Runs one insert/update/delete statement.
    ///
    /// # Errors
    /// - `PersistenceError::Constraint` when a table constraint rejects the row.
    /// - `PersistenceError::Sqlite` for any other store failure.
    pub fn execute<P: Params>(&self, statement: &str, params: P) -> PersistResult<Execution> {
        let started_at = Instant::now();
        let conn = self.lock()?;

        match conn.execute(statement, params) {
            Ok(changed) => {
                let last_insert_id = conn.last_insert_rowid();
                debug!(
                    "event=db_execute module=db status=ok duration_ms={} changed={}",
                    started_at.elapsed().as_millis(),
                    changed
                );
                Ok(Execution {
                    changed,
                    last_insert_id,
                })
            }
            Err(source) => {
                let err = PersistenceError::from_sqlite(statement, source);
                error!(
                    "event=db_execute module=db status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Runs one read statement and materializes every row.
    pub fn query<P: Params>(&self, statement: &str, params: P) -> PersistResult<Vec<SqlRow>> {
        let started_at = Instant::now();
        let conn = self.lock()?;

        match collect_rows(&conn, statement, params) {
            Ok(rows) => {
                debug!(
                    "event=db_query module=db status=ok duration_ms={} rows={}",
                    started_at.elapsed().as_millis(),
                    rows.len()
                );
                Ok(rows)
            }
            Err(source) => {
                let err = PersistenceError::from_sqlite(statement, source);
                error!(
                    "event=db_query module=db status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Reports whether SQLite is currently enforcing foreign keys.
    pub fn foreign_keys_enabled(&self) -> PersistResult<bool> {
        let rows = self.query("PRAGMA foreign_keys;", [])?;
        Ok(rows
            .first()
            .and_then(|row| row.integer("foreign_keys").ok())
            == Some(1))
    }

    fn lock(&self) -> PersistResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PersistenceError::ConnectionPoisoned)
    }
}

fn collect_rows<P: Params>(
    conn: &Connection,
    statement: &str,
    params: P,
) -> rusqlite::Result<Vec<SqlRow>> {
    let mut stmt = conn.prepare(statement)?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query(params)?;
    let mut materialized = Vec::new();
    while let Some(row) = rows.next()? {
        materialized.push(SqlRow::read(row, &names)?);
    }
    Ok(materialized)
}

fn compact_statement(statement: &str, max_chars: usize) -> String {
    let collapsed = statement.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut truncated = collapsed.chars().take(max_chars).collect::<String>();
    if collapsed.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
