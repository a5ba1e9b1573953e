/// Journal services
///
/// Each service is constructed with a shared handle to the storage backend
/// and does one job: the entry store owns entry rows, the lock service gates
/// access to single entries, search and streak derive read-side views, tags
/// keep their own usage counters and the PIN gate guards the whole app.

pub mod entries;
pub mod lock;
pub mod pin;
pub mod search;
pub mod security;
pub mod streaks;
pub mod tags;

pub use entries::EntryStore;
pub use lock::{EntryAccess, LockService};
pub use pin::PinGate;
pub use search::{SearchEngine, SearchQuery};
pub use streaks::StreakCalculator;
pub use tags::TagService;

use thiserror::Error;
use crate::domain::{DomainError, EntryId};
use crate::storage::StorageError;

/// Errors returned by the journal services
#[derive(Error, Debug)]
pub enum JournalError {
    /// An explicit lookup by id found nothing
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A password or PIN broke one or more policy rules
    #[error("Password validation failed: {}", .issues.join(", "))]
    ValidationFailed { issues: Vec<String> },

    /// The supplied password does not match the stored one
    #[error("Access denied: incorrect password")]
    AccessDenied,

    #[error("Entry {entry_id} is not locked")]
    NotLocked { entry_id: EntryId },

    #[error("Entry {entry_id} is locked but has no lock password set")]
    MissingLockHash { entry_id: EntryId },

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl JournalError {
    pub(crate) fn entry_not_found(entry_id: EntryId) -> Self {
        JournalError::NotFound {
            kind: "Entry",
            id: entry_id.to_string(),
        }
    }
}
