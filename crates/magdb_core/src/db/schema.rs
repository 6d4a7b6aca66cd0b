//! Table definitions and compatibility checks.
//!
//! # Invariants
//! - Every statement is `IF NOT EXISTS`, so applying the schema is idempotent.
//! - Required columns are verified after DDL; an older or foreign layout is
//!   reported instead of being silently used.

use super::{SchemaError, SchemaResult};
use rusqlite::Connection;

struct SchemaObject {
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_OBJECTS: &[SchemaObject] = &[
    SchemaObject {
        name: "authors",
        sql: "CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE
        );",
    },
    SchemaObject {
        name: "magazines",
        sql: "CREATE TABLE IF NOT EXISTS magazines (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL
        );",
    },
    SchemaObject {
        name: "articles",
        sql: "CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            author_id INTEGER NOT NULL REFERENCES authors(id),
            magazine_id INTEGER NOT NULL REFERENCES magazines(id)
        );",
    },
    SchemaObject {
        name: "idx_articles_author_id",
        sql: "CREATE INDEX IF NOT EXISTS idx_articles_author_id ON articles(author_id);",
    },
    SchemaObject {
        name: "idx_articles_magazine_id",
        sql: "CREATE INDEX IF NOT EXISTS idx_articles_magazine_id ON articles(magazine_id);",
    },
];

/// Columns every table must expose, in declaration order.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("authors", &["id", "name", "email"]),
    ("magazines", &["id", "name", "category"]),
    (
        "articles",
        &["id", "title", "content", "author_id", "magazine_id"],
    ),
];

/// Creates missing tables/indexes and verifies the resulting layout.
pub(crate) fn apply_schema(conn: &Connection) -> SchemaResult<()> {
    for object in SCHEMA_OBJECTS {
        conn.execute_batch(object.sql)
            .map_err(|source| SchemaError::Ddl {
                table: object.name,
                source,
            })?;
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(SchemaError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> SchemaResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
