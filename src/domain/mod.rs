/// Domain module containing core business logic and data types
///
/// This module defines the core entities (JournalEntry, Tag, Streak) and the
/// pure rules that act on them: word counting, streak arithmetic, pagination
/// and the mood catalogue. Nothing in here touches storage.

pub mod entry;
pub mod page;
pub mod streak;
pub mod tag;
pub mod types;
pub mod user;

// Re-export public types for easy access
pub use entry::*;
pub use page::*;
pub use streak::*;
pub use tag::*;
pub use types::*;
pub use user::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),
}
