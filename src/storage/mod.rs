/// Storage layer for persisting journal data
///
/// This module handles all database operations. The services only see the
/// `JournalStorage` and `CredentialStore` traits; SQLite is the one concrete
/// backend.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{JournalEntry, Tag, Streak, EntryId, TagId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Entry not found: {entry_id}")]
    EntryNotFound { entry_id: String },

    #[error("Tag not found: {tag_id}")]
    TagNotFound { tag_id: String },

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Trait defining the storage interface for the journal
///
/// Each table gets the same small set of primitives: insert, update by
/// identity, delete by identity, and list in a fixed order. Lookups by
/// business key (date, tag name) are provided so callers do not need to scan.
#[async_trait]
pub trait JournalStorage: Send + Sync {
    /// Insert a new entry and return its assigned id
    async fn insert_entry(&self, entry: &JournalEntry) -> Result<EntryId, StorageError>;

    /// Overwrite the row whose id matches `entry.id`
    async fn update_entry(&self, entry: &JournalEntry) -> Result<(), StorageError>;

    /// Remove an entry; returns whether a row was deleted
    async fn delete_entry(&self, entry_id: EntryId) -> Result<bool, StorageError>;

    /// Every entry, newest entry date first
    async fn list_entries(&self) -> Result<Vec<JournalEntry>, StorageError>;

    async fn get_entry(&self, entry_id: EntryId) -> Result<Option<JournalEntry>, StorageError>;

    async fn find_entry_by_date(&self, date: NaiveDate) -> Result<Option<JournalEntry>, StorageError>;

    /// Insert a new tag and return its assigned id
    async fn insert_tag(&self, tag: &Tag) -> Result<TagId, StorageError>;

    async fn update_tag(&self, tag: &Tag) -> Result<(), StorageError>;

    async fn delete_tag(&self, tag_id: TagId) -> Result<bool, StorageError>;

    /// Every tag, most used first
    async fn list_tags(&self) -> Result<Vec<Tag>, StorageError>;

    async fn get_tag(&self, tag_id: TagId) -> Result<Option<Tag>, StorageError>;

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, StorageError>;

    /// The cached streak summary, if one has been computed
    async fn load_streak(&self) -> Result<Option<Streak>, StorageError>;

    /// Insert or replace the singleton streak row
    async fn store_streak(&self, streak: &Streak) -> Result<(), StorageError>;
}

/// Key/value persistence for application credentials
///
/// Stands in for the host platform's secure storage. Only the PIN gate
/// uses it.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn set_credential(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn get_credential(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Remove a key; removing a missing key is not an error
    async fn remove_credential(&self, key: &str) -> Result<(), StorageError>;
}
