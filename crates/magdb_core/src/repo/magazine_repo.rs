//! Magazine repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist magazines (insert when transient, update when persisted).
//! - Resolve articles, contributors and per-author contribution counts.
//!
//! # Invariants
//! - `contributors` lists each author once, no matter how many articles they
//!   wrote for the magazine.
//! - Author lists are ordered by ascending author id; article lists by
//!   ascending article id.
//! - `top_publisher` breaks ties on article count by the lowest magazine id.

use super::decode::{
    article_from_row, author_from_row, decode_all, magazine_from_row, ARTICLE_COLUMNS,
    AUTHOR_COLUMNS, MAGAZINE_COLUMNS,
};
use super::{RepoError, RepoResult};
use crate::db::StorageGateway;
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::ids::MagazineId;
use crate::model::magazine::Magazine;
use rusqlite::params;

/// Authors with at least this many articles count as contributing authors.
pub const CONTRIBUTING_AUTHOR_MIN_ARTICLES: u32 = 3;

/// One author together with how many articles they wrote for a magazine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorContribution {
    pub author: Author,
    pub article_count: u32,
}

/// Repository interface for magazine persistence and traversal.
pub trait MagazineRepository {
    /// Validates, inserts and returns the persisted magazine.
    fn create(&self, name: &str, category: &str) -> RepoResult<Magazine>;
    /// Inserts a transient magazine (assigning its id) or updates name/category.
    fn save(&self, magazine: &mut Magazine) -> RepoResult<()>;
    fn find_by_id(&self, id: MagazineId) -> RepoResult<Option<Magazine>>;
    /// All magazines by ascending id.
    fn list(&self) -> RepoResult<Vec<Magazine>>;
    /// Articles published in the magazine, by ascending article id.
    fn articles(&self, id: MagazineId) -> RepoResult<Vec<Article>>;
    /// Distinct authors who wrote for the magazine.
    fn contributors(&self, id: MagazineId) -> RepoResult<Vec<Author>>;
    /// Article counts grouped by author.
    fn contributions(&self, id: MagazineId) -> RepoResult<Vec<AuthorContribution>>;
    /// Contributors whose contribution satisfies `predicate`.
    fn contributing_authors_where(
        &self,
        id: MagazineId,
        predicate: &dyn Fn(&AuthorContribution) -> bool,
    ) -> RepoResult<Vec<Author>>;
    /// Contributors with more than two articles in the magazine.
    fn contributing_authors(&self, id: MagazineId) -> RepoResult<Vec<Author>>;
    /// Article titles in article order.
    fn article_titles(&self, id: MagazineId) -> RepoResult<Vec<String>>;
    /// Magazine with the most articles, if any article exists.
    fn top_publisher(&self) -> RepoResult<Option<Magazine>>;
}

/// SQLite-backed magazine repository.
pub struct SqliteMagazineRepository<'g> {
    gateway: &'g StorageGateway,
}

impl<'g> SqliteMagazineRepository<'g> {
    pub fn new(gateway: &'g StorageGateway) -> Self {
        Self { gateway }
    }
}

impl MagazineRepository for SqliteMagazineRepository<'_> {
    fn create(&self, name: &str, category: &str) -> RepoResult<Magazine> {
        let mut magazine = Magazine::new(name, category)?;
        self.save(&mut magazine)?;
        Ok(magazine)
    }

    fn save(&self, magazine: &mut Magazine) -> RepoResult<()> {
        if let Some(id) = magazine.id() {
            let execution = self.gateway.execute(
                "UPDATE magazines SET name = ?1, category = ?2 WHERE id = ?3;",
                params![magazine.name(), magazine.category(), id.0],
            )?;
            if execution.changed == 0 {
                return Err(RepoError::NotFound {
                    entity: "magazine",
                    id: id.0,
                });
            }
            return Ok(());
        }

        let execution = self.gateway.execute(
            "INSERT INTO magazines (name, category) VALUES (?1, ?2);",
            params![magazine.name(), magazine.category()],
        )?;
        magazine.assign_id(MagazineId(execution.last_insert_id));
        Ok(())
    }

    fn find_by_id(&self, id: MagazineId) -> RepoResult<Option<Magazine>> {
        let rows = self.gateway.query(
            &format!("SELECT {MAGAZINE_COLUMNS} FROM magazines m WHERE m.id = ?1;"),
            [id.0],
        )?;
        rows.first().map(magazine_from_row).transpose()
    }

    fn list(&self) -> RepoResult<Vec<Magazine>> {
        let rows = self.gateway.query(
            &format!("SELECT {MAGAZINE_COLUMNS} FROM magazines m ORDER BY m.id ASC;"),
            [],
        )?;
        decode_all(&rows, magazine_from_row)
    }

    fn articles(&self, id: MagazineId) -> RepoResult<Vec<Article>> {
        let rows = self.gateway.query(
            &format!(
                "SELECT {ARTICLE_COLUMNS}
                 FROM articles ar
                 WHERE ar.magazine_id = ?1
                 ORDER BY ar.id ASC;"
            ),
            [id.0],
        )?;
        decode_all(&rows, article_from_row)
    }

    fn contributors(&self, id: MagazineId) -> RepoResult<Vec<Author>> {
        let rows = self.gateway.query(
            &format!(
                "SELECT DISTINCT {AUTHOR_COLUMNS}
                 FROM authors au
                 INNER JOIN articles ar ON ar.author_id = au.id
                 WHERE ar.magazine_id = ?1
                 ORDER BY id ASC;"
            ),
            [id.0],
        )?;
        decode_all(&rows, author_from_row)
    }

    fn contributions(&self, id: MagazineId) -> RepoResult<Vec<AuthorContribution>> {
        let rows = self.gateway.query(
            &format!(
                "SELECT {AUTHOR_COLUMNS}, COUNT(ar.id) AS article_count
                 FROM authors au
                 INNER JOIN articles ar ON ar.author_id = au.id
                 WHERE ar.magazine_id = ?1
                 GROUP BY au.id
                 ORDER BY au.id ASC;"
            ),
            [id.0],
        )?;

        let mut contributions = Vec::with_capacity(rows.len());
        for row in &rows {
            let count = row.integer("article_count")?;
            let article_count = u32::try_from(count).map_err(|_| {
                RepoError::InvalidData(format!("article_count `{count}` out of range"))
            })?;
            contributions.push(AuthorContribution {
                author: author_from_row(row)?,
                article_count,
            });
        }
        Ok(contributions)
    }

    fn contributing_authors_where(
        &self,
        id: MagazineId,
        predicate: &dyn Fn(&AuthorContribution) -> bool,
    ) -> RepoResult<Vec<Author>> {
        Ok(self
            .contributions(id)?
            .into_iter()
            .filter(|contribution| predicate(contribution))
            .map(|contribution| contribution.author)
            .collect())
    }

    fn contributing_authors(&self, id: MagazineId) -> RepoResult<Vec<Author>> {
        self.contributing_authors_where(id, &|contribution| {
            contribution.article_count >= CONTRIBUTING_AUTHOR_MIN_ARTICLES
        })
    }

    fn article_titles(&self, id: MagazineId) -> RepoResult<Vec<String>> {
        let rows = self.gateway.query(
            "SELECT title FROM articles WHERE magazine_id = ?1 ORDER BY id ASC;",
            [id.0],
        )?;
        rows.iter()
            .map(|row| -> RepoResult<String> { Ok(row.text("title")?.to_string()) })
            .collect()
    }

    fn top_publisher(&self) -> RepoResult<Option<Magazine>> {
        let rows = self.gateway.query(
            &format!(
                "SELECT {MAGAZINE_COLUMNS}, COUNT(ar.id) AS article_count
                 FROM magazines m
                 INNER JOIN articles ar ON ar.magazine_id = m.id
                 GROUP BY m.id
                 ORDER BY article_count DESC, m.id ASC
                 LIMIT 1;"
            ),
            [],
        )?;
        rows.first().map(magazine_from_row).transpose()
    }
}
