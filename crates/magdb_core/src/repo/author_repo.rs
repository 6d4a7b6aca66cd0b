//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist authors (insert when transient, update when persisted).
//! - Answer "which articles/magazines is this author connected to" by joining
//!   through `articles`.
//!
//! # Invariants
//! - `magazines` never repeats a magazine, however many articles link to it.
//! - Orderings are ascending by id; `magazine_categories` follows the lowest
//!   magazine id carrying each category.

use super::article_repo::{ArticleRepository, SqliteArticleRepository};
use super::decode::{
    article_from_row, author_from_row, decode_all, magazine_from_row, ARTICLE_COLUMNS,
    AUTHOR_COLUMNS, MAGAZINE_COLUMNS,
};
use super::{RepoError, RepoResult};
use crate::db::StorageGateway;
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::ids::AuthorId;
use crate::model::magazine::Magazine;
use rusqlite::params;

/// Repository interface for author persistence and traversal.
pub trait AuthorRepository {
    /// Validates `name`, inserts a new row and returns the persisted author.
    fn create(&self, name: &str) -> RepoResult<Author>;
    /// Inserts a transient author (assigning its id) or updates a persisted one.
    fn save(&self, author: &mut Author) -> RepoResult<()>;
    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// All authors by ascending id.
    fn list(&self) -> RepoResult<Vec<Author>>;
    /// Articles written by the author, by ascending article id.
    fn articles(&self, id: AuthorId) -> RepoResult<Vec<Article>>;
    /// Distinct magazines the author has written for, by ascending id.
    fn magazines(&self, id: AuthorId) -> RepoResult<Vec<Magazine>>;
    /// Distinct categories of those magazines.
    fn magazine_categories(&self, id: AuthorId) -> RepoResult<Vec<String>>;
    /// Writes a new article by `author` for `magazine`.
    fn add_article(
        &self,
        author: &Author,
        magazine: &Magazine,
        title: &str,
    ) -> RepoResult<Article>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'g> {
    gateway: &'g StorageGateway,
}

impl<'g> SqliteAuthorRepository<'g> {
    pub fn new(gateway: &'g StorageGateway) -> Self {
        Self { gateway }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create(&self, name: &str) -> RepoResult<Author> {
        let mut author = Author::new(name)?;
        self.save(&mut author)?;
        Ok(author)
    }

    fn save(&self, author: &mut Author) -> RepoResult<()> {
        if let Some(id) = author.id() {
            // Name is immutable; only the contact address can change.
            let execution = self.gateway.execute(
                "UPDATE authors SET email = ?1 WHERE id = ?2;",
                params![author.email(), id.0],
            )?;
            if execution.changed == 0 {
                return Err(RepoError::NotFound {
                    entity: "author",
                    id: id.0,
                });
            }
            return Ok(());
        }

        let execution = self.gateway.execute(
            "INSERT INTO authors (name, email) VALUES (?1, ?2);",
            params![author.name(), author.email()],
        )?;
        author.assign_id(AuthorId(execution.last_insert_id));
        Ok(())
    }

    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let rows = self.gateway.query(
            &format!("SELECT {AUTHOR_COLUMNS} FROM authors au WHERE au.id = ?1;"),
            [id.0],
        )?;
        rows.first().map(author_from_row).transpose()
    }

    fn list(&self) -> RepoResult<Vec<Author>> {
        let rows = self.gateway.query(
            &format!("SELECT {AUTHOR_COLUMNS} FROM authors au ORDER BY au.id ASC;"),
            [],
        )?;
        decode_all(&rows, author_from_row)
    }

    fn articles(&self, id: AuthorId) -> RepoResult<Vec<Article>> {
        let rows = self.gateway.query(
            &format!(
                "SELECT {ARTICLE_COLUMNS}
                 FROM articles ar
                 WHERE ar.author_id = ?1
                 ORDER BY ar.id ASC;"
            ),
            [id.0],
        )?;
        decode_all(&rows, article_from_row)
    }

    fn magazines(&self, id: AuthorId) -> RepoResult<Vec<Magazine>> {
        let rows = self.gateway.query(
            &format!(
                "SELECT DISTINCT {MAGAZINE_COLUMNS}
                 FROM magazines m
                 INNER JOIN articles ar ON ar.magazine_id = m.id
                 WHERE ar.author_id = ?1
                 ORDER BY id ASC;"
            ),
            [id.0],
        )?;
        decode_all(&rows, magazine_from_row)
    }

    fn magazine_categories(&self, id: AuthorId) -> RepoResult<Vec<String>> {
        let rows = self.gateway.query(
            "SELECT m.category AS category, MIN(m.id) AS first_magazine_id
             FROM magazines m
             INNER JOIN articles ar ON ar.magazine_id = m.id
             WHERE ar.author_id = ?1
             GROUP BY m.category
             ORDER BY first_magazine_id ASC;",
            [id.0],
        )?;
        rows.iter()
            .map(|row| -> RepoResult<String> { Ok(row.text("category")?.to_string()) })
            .collect()
    }

    fn add_article(
        &self,
        author: &Author,
        magazine: &Magazine,
        title: &str,
    ) -> RepoResult<Article> {
        SqliteArticleRepository::new(self.gateway).create(author, title, magazine)
    }
}
