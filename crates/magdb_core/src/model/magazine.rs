//! Magazine domain model.
//!
//! # Invariants
//! - `name` is trimmed and 2..=16 characters long.
//! - `category` is trimmed and non-empty.

use super::ids::MagazineId;
use super::validation::{
    validate_magazine_category, validate_magazine_name, ReferenceError, ValidationError,
};
use serde::Serialize;

/// A publication that carries articles under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Magazine {
    id: Option<MagazineId>,
    name: String,
    category: String,
}

impl Magazine {
    /// Creates a transient magazine.
    pub fn new(name: &str, category: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            name: validate_magazine_name(name)?,
            category: validate_magazine_category(category)?,
        })
    }

    pub(crate) fn restore(
        id: MagazineId,
        name: &str,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let mut magazine = Self::new(name, category)?;
        magazine.id = Some(id);
        Ok(magazine)
    }

    pub fn id(&self) -> Option<MagazineId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Renames the magazine. The old name is kept when validation fails.
    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_magazine_name(name)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), ValidationError> {
        self.category = validate_magazine_category(category)?;
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn require_id(&self, entity: &'static str) -> Result<MagazineId, ReferenceError> {
        self.id.ok_or(ReferenceError {
            entity,
            reference: "magazine",
        })
    }

    pub(crate) fn assign_id(&mut self, id: MagazineId) {
        self.id = Some(id);
    }
}
