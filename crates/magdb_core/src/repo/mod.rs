//! Repository layer: persistence and relationship traversal.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Keep every SQL statement (inserts, updates, joins) inside the core.
//!
//! # Invariants
//! - Write paths validate before the first storage call; a rejected value
//!   never leaves a partial row behind.
//! - Relationship queries return owned, fully materialized values in a
//!   deterministic order (ascending id unless documented otherwise).
//! - Read paths reject rows that no longer satisfy entity invariants.

use crate::db::{ColumnError, PersistenceError};
use crate::model::validation::{ReferenceError, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod author_repo;
mod decode;
pub mod magazine_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for entity persistence and relationship queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Reference(ReferenceError),
    Persistence(PersistenceError),
    NotFound { entity: &'static str, id: i64 },
    /// A stored row no longer satisfies entity rules.
    ///
    /// Rows are re-validated on every read, so one row written outside these
    /// repositories (e.g. a 30-character magazine name) fails the whole list
    /// or relationship query that reaches it.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Reference(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Reference(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ReferenceError> for RepoError {
    fn from(value: ReferenceError) -> Self {
        Self::Reference(value)
    }
}

impl From<PersistenceError> for RepoError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<ColumnError> for RepoError {
    fn from(value: ColumnError) -> Self {
        Self::InvalidData(value.to_string())
    }
}
