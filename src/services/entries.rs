/// Entry store: the only writer of journal entry rows
///
/// Entries are keyed by calendar date. Saving an entry for a date that
/// already has one updates that row in place and keeps its id and
/// creation time.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::domain::{EntryId, JournalEntry, Page};
use crate::services::JournalError;
use crate::storage::JournalStorage;

pub struct EntryStore<S> {
    storage: Arc<S>,
    /// Serializes lookup-then-write so two saves for one date cannot both insert
    write_lock: Arc<Mutex<()>>,
}

impl<S> Clone for EntryStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S: JournalStorage> EntryStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Insert or update the entry for `entry.entry_date`
    ///
    /// Word count and `updated_at` are always recomputed. `created_at` is
    /// stamped on insert and carried over from the existing row on update.
    /// Returns the entry as persisted, with its id populated.
    pub async fn save(&self, entry: JournalEntry) -> Result<JournalEntry, JournalError> {
        entry.validate()?;

        let _guard = self.write_lock.lock().await;
        self.persist(entry).await
    }

    /// Load the entry `entry_id`, apply `change` and save the result
    ///
    /// The whole read-modify-write holds the store's write lock, so no
    /// other save can land in between. If `change` fails nothing is written.
    pub async fn update_with<F>(&self, entry_id: EntryId, change: F) -> Result<JournalEntry, JournalError>
    where
        F: FnOnce(&mut JournalEntry) -> Result<(), JournalError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut entry = self.get_by_id(entry_id).await?;
        change(&mut entry)?;
        entry.validate()?;
        self.persist(entry).await
    }

    /// Insert or update by date; callers hold `write_lock`
    async fn persist(&self, mut entry: JournalEntry) -> Result<JournalEntry, JournalError> {
        let now = Utc::now();
        entry.updated_at = now;
        entry.refresh_word_count();

        match self.storage.find_entry_by_date(entry.entry_date).await? {
            None => {
                entry.created_at = now;
                let entry_id = self.storage.insert_entry(&entry).await?;
                entry.id = Some(entry_id);
                tracing::info!("Saved new journal entry {} for {}", entry_id, entry.entry_date);
            }
            Some(existing) => {
                entry.id = existing.id;
                entry.created_at = existing.created_at;
                self.storage.update_entry(&entry).await?;
                tracing::info!("Updated journal entry for {}", entry.entry_date);
            }
        }

        Ok(entry)
    }

    /// Remove the entry for `date`; a date without an entry is a no-op
    ///
    /// Returns whether an entry was removed.
    pub async fn delete(&self, date: NaiveDate) -> Result<bool, JournalError> {
        let _guard = self.write_lock.lock().await;

        match self.storage.find_entry_by_date(date).await? {
            Some(JournalEntry { id: Some(entry_id), .. }) => {
                let removed = self.storage.delete_entry(entry_id).await?;
                tracing::info!("Deleted journal entry for {}", date);
                Ok(removed)
            }
            _ => {
                tracing::debug!("No journal entry for {}, nothing to delete", date);
                Ok(false)
            }
        }
    }

    /// Remove an entry by id; a missing id is a no-op
    pub async fn delete_by_id(&self, entry_id: EntryId) -> Result<bool, JournalError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.storage.delete_entry(entry_id).await?)
    }

    /// Every entry, most recent date first
    pub async fn get_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self.storage.list_entries().await?)
    }

    pub async fn get_by_id(&self, entry_id: EntryId) -> Result<JournalEntry, JournalError> {
        self.storage
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| JournalError::entry_not_found(entry_id))
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Option<JournalEntry>, JournalError> {
        Ok(self.storage.find_entry_by_date(date).await?)
    }

    /// One 1-indexed page of the newest-first entry list
    pub async fn get_paginated(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Page<JournalEntry>, JournalError> {
        let all = self.get_all().await?;
        Ok(Page::paginate(all, page_number, page_size)?)
    }

    pub async fn count(&self) -> Result<usize, JournalError> {
        Ok(self.get_all().await?.len())
    }
}
