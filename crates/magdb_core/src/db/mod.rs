//! SQLite storage gateway and schema bootstrap.
//!
//! # Responsibility
//! - Own the single SQLite connection used by every repository.
//! - Create the `authors`, `magazines` and `articles` tables idempotently.
//! - Expose execute/query primitives with typed failures.
//!
//! # Invariants
//! - Returned gateways have `foreign_keys=ON` and a verified schema.
//! - No other component opens its own connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod gateway;
mod open;
mod row;
pub mod schema;

pub use gateway::{Execution, PersistResult, PersistenceError, StorageGateway};
pub use open::{open_db, open_db_in_memory};
pub use row::{ColumnError, SqlRow};

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failure while opening the store or preparing its schema.
#[derive(Debug)]
pub enum SchemaError {
    /// Connection could not be opened or configured.
    Sqlite(rusqlite::Error),
    /// DDL for one table or index was rejected.
    Ddl {
        table: &'static str,
        source: rusqlite::Error,
    },
    /// A pre-existing table lacks a column this core relies on.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    ConnectionPoisoned,
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Ddl { table, source } => {
                write!(f, "failed to create schema object `{table}`: {source}")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "incompatible existing schema: table `{table}` has no column `{column}`"
            ),
            Self::ConnectionPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Ddl { source, .. } => Some(source),
            Self::MissingRequiredColumn { .. } => None,
            Self::ConnectionPoisoned => None,
        }
    }
}

impl From<rusqlite::Error> for SchemaError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
