//! Materialized query rows.

use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One fully materialized result row, keyed by column name.
///
/// Column order follows the `SELECT` list.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlRow {
    columns: Vec<(String, Value)>,
}

/// A column was absent or held a value of the wrong storage class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnError {
    pub column: String,
    pub expected: &'static str,
}

impl Display for ColumnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "column `{}` missing or not {}", self.column, self.expected)
    }
}

impl Error for ColumnError {}

impl SqlRow {
    pub(crate) fn read(row: &rusqlite::Row<'_>, names: &[String]) -> rusqlite::Result<Self> {
        let mut columns = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            columns.push((name.clone(), row.get::<_, Value>(index)?));
        }
        Ok(Self { columns })
    }

    /// Raw value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in select order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn integer(&self, column: &str) -> Result<i64, ColumnError> {
        match self.get(column) {
            Some(Value::Integer(value)) => Ok(*value),
            _ => Err(column_error(column, "an integer")),
        }
    }

    pub fn text(&self, column: &str) -> Result<&str, ColumnError> {
        match self.get(column) {
            Some(Value::Text(value)) => Ok(value.as_str()),
            _ => Err(column_error(column, "text")),
        }
    }

    /// Like [`SqlRow::text`], but `NULL` maps to `None`.
    pub fn optional_text(&self, column: &str) -> Result<Option<&str>, ColumnError> {
        match self.get(column) {
            Some(Value::Text(value)) => Ok(Some(value.as_str())),
            Some(Value::Null) => Ok(None),
            _ => Err(column_error(column, "text or null")),
        }
    }
}

fn column_error(column: &str, expected: &'static str) -> ColumnError {
    ColumnError {
        column: column.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::SqlRow;
    use rusqlite::types::Value;

    fn sample() -> SqlRow {
        SqlRow {
            columns: vec![
                ("id".to_string(), Value::Integer(7)),
                ("name".to_string(), Value::Text("Ama".to_string())),
                ("email".to_string(), Value::Null),
            ],
        }
    }

    #[test]
    fn typed_accessors_read_matching_columns() {
        let row = sample();
        assert_eq!(row.integer("id").unwrap(), 7);
        assert_eq!(row.text("name").unwrap(), "Ama");
        assert_eq!(row.optional_text("email").unwrap(), None);
        assert_eq!(
            row.column_names().collect::<Vec<_>>(),
            vec!["id", "name", "email"]
        );
    }

    #[test]
    fn mismatched_storage_class_is_reported() {
        let row = sample();
        let err = row.integer("name").unwrap_err();
        assert_eq!(err.column, "name");
        assert!(row.text("missing").is_err());
    }
}
