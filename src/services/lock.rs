/// Per-entry password locks
///
/// An entry moves between two states: Unlocked -> Locked via `lock`, and
/// Locked -> Unlocked via `unlock` with the matching password. Every write
/// goes back through the entry store, so locking also refreshes the entry's
/// `updated_at`.

use chrono::Utc;

use crate::domain::{EntryId, JournalEntry, PasswordType};
use crate::services::{security, EntryStore, JournalError};
use crate::storage::JournalStorage;

/// Result of asking to read a possibly locked entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryAccess {
    /// The entry is unlocked, or the password matched
    Readable(JournalEntry),
    /// The entry is locked and no matching password was supplied
    Inaccessible,
}

impl EntryAccess {
    pub fn into_entry(self) -> Option<JournalEntry> {
        match self {
            EntryAccess::Readable(entry) => Some(entry),
            EntryAccess::Inaccessible => None,
        }
    }
}

pub struct LockService<S> {
    entries: EntryStore<S>,
}

impl<S> Clone for LockService<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S: JournalStorage> LockService<S> {
    pub fn new(entries: EntryStore<S>) -> Self {
        Self { entries }
    }

    /// Lock an entry behind `password`
    ///
    /// The password is checked against the rules of `password_type` first;
    /// if any rule fails the entry is left untouched and every failed rule
    /// is reported. Locking an already locked entry replaces its password.
    pub async fn lock(
        &self,
        entry_id: EntryId,
        password: &str,
        password_type: PasswordType,
    ) -> Result<JournalEntry, JournalError> {
        let entry = self
            .entries
            .update_with(entry_id, |entry| {
                let issues = security::validate_lock_password(password, password_type);
                if !issues.is_empty() {
                    tracing::warn!("Refused to lock entry {}: {}", entry_id, issues.join(", "));
                    return Err(JournalError::ValidationFailed { issues });
                }

                entry.is_locked = true;
                entry.lock_password_hash = Some(security::hash_password(password));
                entry.password_type = Some(password_type);
                entry.locked_at = Some(Utc::now());
                Ok(())
            })
            .await?;

        tracing::info!("Locked entry {} with a {} password", entry_id, password_type);
        Ok(entry)
    }

    /// Unlock an entry with its password
    ///
    /// Unlocking an entry that is not locked, or that lost its stored hash,
    /// is an error rather than a silent success. A wrong password returns
    /// `AccessDenied` and leaves the entry locked.
    pub async fn unlock(&self, entry_id: EntryId, password: &str) -> Result<JournalEntry, JournalError> {
        let entry = self
            .entries
            .update_with(entry_id, |entry| {
                if !entry.is_locked {
                    return Err(JournalError::NotLocked { entry_id });
                }

                let stored_hash = match entry.lock_password_hash.as_deref() {
                    Some(hash) if !hash.is_empty() => hash,
                    _ => return Err(JournalError::MissingLockHash { entry_id }),
                };

                if !security::verify_password(password, stored_hash) {
                    tracing::warn!("Rejected unlock attempt for entry {}", entry_id);
                    return Err(JournalError::AccessDenied);
                }

                entry.clear_lock();
                Ok(())
            })
            .await?;

        tracing::info!("Unlocked entry {}", entry_id);
        Ok(entry)
    }

    /// Whether the entry is locked; a missing entry counts as unlocked
    pub async fn is_locked(&self, entry_id: EntryId) -> Result<bool, JournalError> {
        match self.entries.get_by_id(entry_id).await {
            Ok(entry) => Ok(entry.is_locked),
            Err(JournalError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Read an entry, honouring its lock
    ///
    /// Unlocked entries are returned as-is. A locked entry is readable only
    /// when `password` matches its stored hash.
    pub async fn read_if_unlocked(
        &self,
        entry_id: EntryId,
        password: Option<&str>,
    ) -> Result<EntryAccess, JournalError> {
        let entry = self.entries.get_by_id(entry_id).await?;

        if !entry.is_locked {
            return Ok(EntryAccess::Readable(entry));
        }

        let stored_hash = entry.lock_password_hash.as_deref().unwrap_or_default();
        match password {
            Some(password) if security::verify_password(password, stored_hash) => {
                Ok(EntryAccess::Readable(entry))
            }
            _ => Ok(EntryAccess::Inaccessible),
        }
    }
}
