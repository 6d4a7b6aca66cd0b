//! Author domain model.
//!
//! # Invariants
//! - `name` is non-blank and fixed at construction; there is no setter.
//! - `email`, when present, is trimmed and shaped like an address.
//! - `id` is `None` until the first successful save.

use super::ids::AuthorId;
use super::validation::{
    validate_author_email, validate_author_name, ReferenceError, ValidationError,
};
use serde::Serialize;

/// A writer who publishes articles in magazines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
    email: Option<String>,
}

impl Author {
    /// Creates a transient author.
    ///
    /// The name is kept byte-for-byte; only blank names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_author_name(&name)?;
        Ok(Self {
            id: None,
            name,
            email: None,
        })
    }

    /// Creates a transient author with a contact address.
    pub fn with_email(name: impl Into<String>, email: &str) -> Result<Self, ValidationError> {
        let mut author = Self::new(name)?;
        author.set_email(Some(email))?;
        Ok(author)
    }

    /// Rebuilds a persisted author from stored columns, re-checking invariants.
    pub(crate) fn restore(
        id: AuthorId,
        name: String,
        email: Option<String>,
    ) -> Result<Self, ValidationError> {
        validate_author_name(&name)?;
        let email = validate_author_email(email.as_deref())?;
        Ok(Self {
            id: Some(id),
            name,
            email,
        })
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Replaces the email. Takes effect in storage on the next save.
    pub fn set_email(&mut self, email: Option<&str>) -> Result<(), ValidationError> {
        self.email = validate_author_email(email)?;
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the id, or a `ReferenceError` naming `entity` as the writer.
    pub fn require_id(&self, entity: &'static str) -> Result<AuthorId, ReferenceError> {
        self.id.ok_or(ReferenceError {
            entity,
            reference: "author",
        })
    }

    pub(crate) fn assign_id(&mut self, id: AuthorId) {
        self.id = Some(id);
    }
}
