//! Author/Magazine/Article persistence over SQLite without an ORM.
//! Relationship traversal is plain SQL joins through the `articles` table.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{DbLocation, StoreConfig};
pub use db::{
    open_db, open_db_in_memory, PersistenceError, SchemaError, SqlRow, StorageGateway,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::Article;
pub use model::author::Author;
pub use model::ids::{ArticleId, AuthorId, MagazineId};
pub use model::magazine::Magazine;
pub use model::validation::{ReferenceError, ValidationError, Violation};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::magazine_repo::{
    AuthorContribution, MagazineRepository, SqliteMagazineRepository,
    CONTRIBUTING_AUTHOR_MIN_ARTICLES,
};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
