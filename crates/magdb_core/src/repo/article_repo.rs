//! Article repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create the join rows that link one author to one magazine.
//! - Resolve an article back to its author and magazine.
//!
//! # Invariants
//! - Checks run in order: title, author reference, magazine reference, insert.
//! - Foreign keys are written once; `save` only rewrites title and content.

use super::decode::{
    article_from_row, author_from_row, decode_all, magazine_from_row, ARTICLE_COLUMNS,
    AUTHOR_COLUMNS, MAGAZINE_COLUMNS,
};
use super::{RepoError, RepoResult};
use crate::db::StorageGateway;
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::ids::ArticleId;
use crate::model::magazine::Magazine;
use crate::model::validation::validate_article_title;
use rusqlite::params;

/// Repository interface for article persistence.
pub trait ArticleRepository {
    /// Creates an article with empty content.
    fn create(&self, author: &Author, title: &str, magazine: &Magazine) -> RepoResult<Article>;
    fn create_with_content(
        &self,
        author: &Author,
        title: &str,
        magazine: &Magazine,
        content: &str,
    ) -> RepoResult<Article>;
    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>>;
    /// All articles by ascending id.
    fn list(&self) -> RepoResult<Vec<Article>>;
    /// Persists title/content changes of an existing article.
    fn save(&self, article: &Article) -> RepoResult<()>;
    fn author_of(&self, article: &Article) -> RepoResult<Author>;
    fn magazine_of(&self, article: &Article) -> RepoResult<Magazine>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'g> {
    gateway: &'g StorageGateway,
}

impl<'g> SqliteArticleRepository<'g> {
    pub fn new(gateway: &'g StorageGateway) -> Self {
        Self { gateway }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create(&self, author: &Author, title: &str, magazine: &Magazine) -> RepoResult<Article> {
        self.create_with_content(author, title, magazine, "")
    }

    fn create_with_content(
        &self,
        author: &Author,
        title: &str,
        magazine: &Magazine,
        content: &str,
    ) -> RepoResult<Article> {
        let title = validate_article_title(title)?;
        let author_id = author.require_id("article")?;
        let magazine_id = magazine.require_id("article")?;

        let execution = self.gateway.execute(
            "INSERT INTO articles (title, content, author_id, magazine_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![title.as_str(), content, author_id.0, magazine_id.0],
        )?;

        Ok(Article::restore(
            ArticleId(execution.last_insert_id),
            &title,
            content.to_string(),
            author_id,
            magazine_id,
        )?)
    }

    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let rows = self.gateway.query(
            &format!("SELECT {ARTICLE_COLUMNS} FROM articles ar WHERE ar.id = ?1;"),
            [id.0],
        )?;
        rows.first().map(article_from_row).transpose()
    }

    fn list(&self) -> RepoResult<Vec<Article>> {
        let rows = self.gateway.query(
            &format!("SELECT {ARTICLE_COLUMNS} FROM articles ar ORDER BY ar.id ASC;"),
            [],
        )?;
        decode_all(&rows, article_from_row)
    }

    fn save(&self, article: &Article) -> RepoResult<()> {
        let execution = self.gateway.execute(
            "UPDATE articles SET title = ?1, content = ?2 WHERE id = ?3;",
            params![article.title(), article.content(), article.id().0],
        )?;

        if execution.changed == 0 {
            return Err(RepoError::NotFound {
                entity: "article",
                id: article.id().0,
            });
        }

        Ok(())
    }

    fn author_of(&self, article: &Article) -> RepoResult<Author> {
        let rows = self.gateway.query(
            &format!("SELECT {AUTHOR_COLUMNS} FROM authors au WHERE au.id = ?1;"),
            [article.author_id().0],
        )?;
        rows.first()
            .map(author_from_row)
            .transpose()?
            .ok_or(RepoError::NotFound {
                entity: "author",
                id: article.author_id().0,
            })
    }

    fn magazine_of(&self, article: &Article) -> RepoResult<Magazine> {
        let rows = self.gateway.query(
            &format!("SELECT {MAGAZINE_COLUMNS} FROM magazines m WHERE m.id = ?1;"),
            [article.magazine_id().0],
        )?;
        rows.first()
            .map(magazine_from_row)
            .transpose()?
            .ok_or(RepoError::NotFound {
                entity: "magazine",
                id: article.magazine_id().0,
            })
    }
}
