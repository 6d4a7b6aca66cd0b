//! Store location configuration.
//!
//! # Responsibility
//! - Describe where the single SQLite database lives.
//! - Resolve that location from the process environment.
//!
//! # Invariants
//! - The database location is the only runtime configuration of the core.
//! - `:memory:` always selects a private in-memory database.

use std::path::{Path, PathBuf};

/// Environment variable holding the database location.
pub const DATABASE_ENV_VAR: &str = "MAGDB_DATABASE";
/// Database file used when nothing is configured.
pub const DEFAULT_DB_FILE: &str = "magazine.db";

const MEMORY_SENTINEL: &str = ":memory:";

/// Physical location of the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// On-disk database file. Parent directories must already exist.
    File(PathBuf),
    /// Private in-memory database, discarded when the gateway is dropped.
    Memory,
}

impl DbLocation {
    /// Parses a user-supplied location string.
    ///
    /// Blank input falls back to [`DEFAULT_DB_FILE`].
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::File(PathBuf::from(DEFAULT_DB_FILE))
        } else if trimmed == MEMORY_SENTINEL {
            Self::Memory
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Short label used in log events (`file` or `memory`).
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Configuration consumed by [`crate::db::StorageGateway::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DbLocation,
}

impl StoreConfig {
    /// Config pointing at a database file.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: DbLocation::File(path.as_ref().to_path_buf()),
        }
    }

    /// Config for a fresh in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
        }
    }

    /// Reads `MAGDB_DATABASE`, defaulting to `magazine.db`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let location = lookup(DATABASE_ENV_VAR)
            .map(|value| DbLocation::parse(&value))
            .unwrap_or_else(|| DbLocation::File(PathBuf::from(DEFAULT_DB_FILE)));
        Self { location }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::file(DEFAULT_DB_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::{DbLocation, StoreConfig, DATABASE_ENV_VAR, DEFAULT_DB_FILE};
    use std::path::PathBuf;

    #[test]
    fn parse_recognizes_memory_sentinel() {
        assert_eq!(DbLocation::parse(" :memory: "), DbLocation::Memory);
    }

    #[test]
    fn parse_blank_falls_back_to_default_file() {
        assert_eq!(
            DbLocation::parse("   "),
            DbLocation::File(PathBuf::from(DEFAULT_DB_FILE))
        );
    }

    #[test]
    fn lookup_uses_configured_path() {
        let config = StoreConfig::from_lookup(|key| {
            (key == DATABASE_ENV_VAR).then(|| "/tmp/press.sqlite3".to_string())
        });
        assert_eq!(
            config.location,
            DbLocation::File(PathBuf::from("/tmp/press.sqlite3"))
        );
        assert_eq!(config.location.mode(), "file");
    }

    #[test]
    fn missing_variable_uses_default() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config, StoreConfig::default());
    }
}
