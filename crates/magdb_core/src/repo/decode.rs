//! Shared select lists and row decoders.
//!
//! Every select aliases its columns explicitly so decoding does not depend on
//! how SQLite names joined columns.

use super::{RepoError, RepoResult};
use crate::db::SqlRow;
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::ids::{ArticleId, AuthorId, MagazineId};
use crate::model::magazine::Magazine;

pub(crate) const AUTHOR_COLUMNS: &str = "au.id AS id, au.name AS name, au.email AS email";

pub(crate) const MAGAZINE_COLUMNS: &str =
    "m.id AS id, m.name AS name, m.category AS category";

pub(crate) const ARTICLE_COLUMNS: &str = "ar.id AS id,
    ar.title AS title,
    ar.content AS content,
    ar.author_id AS author_id,
    ar.magazine_id AS magazine_id";

pub(crate) fn author_from_row(row: &SqlRow) -> RepoResult<Author> {
    let id = AuthorId(row.integer("id")?);
    let name = row.text("name")?.to_string();
    let email = row.optional_text("email")?.map(str::to_string);
    Author::restore(id, name, email)
        .map_err(|err| RepoError::InvalidData(format!("authors row {id}: {err}")))
}

pub(crate) fn magazine_from_row(row: &SqlRow) -> RepoResult<Magazine> {
    let id = MagazineId(row.integer("id")?);
    Magazine::restore(id, row.text("name")?, row.text("category")?)
        .map_err(|err| RepoError::InvalidData(format!("magazines row {id}: {err}")))
}

pub(crate) fn article_from_row(row: &SqlRow) -> RepoResult<Article> {
    let id = ArticleId(row.integer("id")?);
    Article::restore(
        id,
        row.text("title")?,
        row.text("content")?.to_string(),
        AuthorId(row.integer("author_id")?),
        MagazineId(row.integer("magazine_id")?),
    )
    .map_err(|err| RepoError::InvalidData(format!("articles row {id}: {err}")))
}

pub(crate) fn decode_all<T>(
    rows: &[SqlRow],
    decode: impl Fn(&SqlRow) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    rows.iter().map(decode).collect()
}
