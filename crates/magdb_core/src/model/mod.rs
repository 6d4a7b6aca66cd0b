//! Domain model for authors, magazines and the articles linking them.
//!
//! # Responsibility
//! - Define the validated entity records handed out by repositories.
//! - Keep validation independent from storage.
//!
//! # Invariants
//! - Entities are either transient (`id() == None`) or persisted; the
//!   transition happens once, inside a repository save.
//! - Articles are always persisted values; a transient article is just the
//!   arguments of `ArticleRepository::create`.

pub mod article;
pub mod author;
pub mod ids;
pub mod magazine;
pub mod validation;
