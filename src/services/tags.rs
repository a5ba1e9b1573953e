/// Tag table management
///
/// Usage counters only move through `create_or_get`. Saving an entry with
/// tag names does not touch this table.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Tag, TagId, PREDEFINED_TAGS};
use crate::services::JournalError;
use crate::storage::JournalStorage;

pub struct TagService<S> {
    storage: Arc<S>,
    /// Serializes lookup-then-write so counts are not lost and a new name is inserted once
    write_lock: Arc<Mutex<()>>,
}

impl<S> Clone for TagService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S: JournalStorage> TagService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Fetch the tag called `name`, counting one more use, or create it
    pub async fn create_or_get(&self, name: &str) -> Result<Tag, JournalError> {
        let name = Tag::normalize_name(name)?;
        let _guard = self.write_lock.lock().await;

        if let Some(mut existing) = self.storage.find_tag_by_name(&name).await? {
            existing.usage_count += 1;
            self.storage.update_tag(&existing).await?;
            return Ok(existing);
        }

        let mut tag = Tag::new(&name)?;
        tag.id = Some(self.storage.insert_tag(&tag).await?);
        Ok(tag)
    }

    /// Every tag, most used first
    pub async fn get_all(&self) -> Result<Vec<Tag>, JournalError> {
        Ok(self.storage.list_tags().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, JournalError> {
        Ok(self.storage.find_tag_by_name(name.trim()).await?)
    }

    pub async fn get_by_id(&self, tag_id: TagId) -> Result<Tag, JournalError> {
        self.storage
            .get_tag(tag_id)
            .await?
            .ok_or_else(|| JournalError::NotFound {
                kind: "Tag",
                id: tag_id.to_string(),
            })
    }

    /// Remove a tag; a missing id is a no-op
    pub async fn delete(&self, tag_id: TagId) -> Result<bool, JournalError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.storage.delete_tag(tag_id).await?)
    }

    pub async fn most_used(&self, limit: usize) -> Result<Vec<Tag>, JournalError> {
        let mut tags = self.get_all().await?;
        tags.truncate(limit);
        Ok(tags)
    }

    pub fn predefined(&self) -> &'static [&'static str] {
        &PREDEFINED_TAGS
    }
}
