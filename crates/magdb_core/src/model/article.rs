//! Article domain model: the join entity between authors and magazines.
//!
//! # Invariants
//! - An `Article` value only exists for a persisted row, so `id` is never absent.
//! - `author_id` and `magazine_id` are fixed at creation; there are no setters.
//! - `title` is trimmed and 5..=50 characters long.

use super::ids::{ArticleId, AuthorId, MagazineId};
use super::validation::{validate_article_title, ValidationError};
use serde::Serialize;

/// One piece written by an author for a magazine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    id: ArticleId,
    title: String,
    content: String,
    author_id: AuthorId,
    magazine_id: MagazineId,
}

impl Article {
    pub(crate) fn restore(
        id: ArticleId,
        title: &str,
        content: String,
        author_id: AuthorId,
        magazine_id: MagazineId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            title: validate_article_title(title)?,
            content,
            author_id,
            magazine_id,
        })
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn magazine_id(&self) -> MagazineId {
        self.magazine_id
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = validate_article_title(title)?;
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}
