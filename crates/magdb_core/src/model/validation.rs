//! Field validation rules shared by all entities.
//!
//! # Invariants
//! - Validation runs before any storage call and never touches the store.
//! - Length limits count Unicode scalar values of the trimmed input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MAGAZINE_NAME_MIN_CHARS: usize = 2;
pub const MAGAZINE_NAME_MAX_CHARS: usize = 16;
pub const ARTICLE_TITLE_MIN_CHARS: usize = 5;
pub const ARTICLE_TITLE_MAX_CHARS: usize = 50;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// What was wrong with a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Empty or whitespace-only.
    Blank,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    /// Present but not in the expected shape.
    Malformed(&'static str),
}

/// An entity attribute failed a domain rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entity: &'static str,
    pub field: &'static str,
    pub violation: Violation,
}

impl ValidationError {
    fn new(entity: &'static str, field: &'static str, violation: Violation) -> Self {
        Self {
            entity,
            field,
            violation,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self { entity, field, .. } = self;
        match self.violation {
            Violation::Blank => write!(f, "{entity} {field} cannot be empty"),
            Violation::TooShort { min, actual } => write!(
                f,
                "{entity} {field} must be at least {min} characters, got {actual}"
            ),
            Violation::TooLong { max, actual } => write!(
                f,
                "{entity} {field} must be at most {max} characters, got {actual}"
            ),
            Violation::Malformed(expected) => {
                write!(f, "{entity} {field} is not a valid {expected}")
            }
        }
    }
}

impl Error for ValidationError {}

/// An operation needed a persisted entity but got a transient one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceError {
    /// Entity being written, e.g. `article`.
    pub entity: &'static str,
    /// Role of the missing reference, e.g. `author`.
    pub reference: &'static str,
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} has not been persisted (no id assigned)",
            self.entity, self.reference
        )
    }
}

impl Error for ReferenceError {}

/// Author names must contain something besides whitespace. Stored as given.
pub fn validate_author_name(name: &str) -> Result<(), ValidationError> {
    require_non_blank("author", "name", name).map(|_| ())
}

/// Optional author email; `None` passes, blanks and malformed values fail.
pub fn validate_author_email(email: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(email) = email else {
        return Ok(None);
    };
    let trimmed = require_non_blank("author", "email", email)?;
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::new(
            "author",
            "email",
            Violation::Malformed("email address"),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// Returns the trimmed magazine name.
pub fn validate_magazine_name(name: &str) -> Result<String, ValidationError> {
    bounded(
        "magazine",
        "name",
        name,
        MAGAZINE_NAME_MIN_CHARS,
        MAGAZINE_NAME_MAX_CHARS,
    )
}

/// Returns the trimmed magazine category.
pub fn validate_magazine_category(category: &str) -> Result<String, ValidationError> {
    require_non_blank("magazine", "category", category).map(str::to_string)
}

/// Returns the trimmed article title.
pub fn validate_article_title(title: &str) -> Result<String, ValidationError> {
    bounded(
        "article",
        "title",
        title,
        ARTICLE_TITLE_MIN_CHARS,
        ARTICLE_TITLE_MAX_CHARS,
    )
}

fn require_non_blank<'a>(
    entity: &'static str,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(entity, field, Violation::Blank));
    }
    Ok(trimmed)
}

fn bounded(
    entity: &'static str,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = require_non_blank(entity, field, value)?;
    let actual = trimmed.chars().count();
    if actual < min {
        return Err(ValidationError::new(
            entity,
            field,
            Violation::TooShort { min, actual },
        ));
    }
    if actual > max {
        return Err(ValidationError::new(
            entity,
            field,
            Violation::TooLong { max, actual },
        ));
    }
    Ok(trimmed.to_string())
}
