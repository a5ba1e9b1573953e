/// JournalEntry entity
///
/// This module defines the JournalEntry struct that represents everything a
/// user wrote for one calendar day, plus the lock state that gates access to it.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{EntryId, PasswordType, DomainError};

const MAX_TITLE_LEN: usize = 200;

/// One journaled record for a single calendar date
///
/// The entry date is the business key: the store keeps at most one entry per
/// date. `id` is `None` until the entry has been saved for the first time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Storage identity, assigned on first insertion
    pub id: Option<EntryId>,
    /// The calendar day this entry is about
    pub entry_date: NaiveDate,
    pub title: Option<String>,
    pub content: Option<String>,
    pub primary_mood: Option<String>,
    pub secondary_mood_1: Option<String>,
    pub secondary_mood_2: Option<String>,
    pub category: Option<String>,
    /// Tag names attached to this entry (not linked to the tag table)
    pub tags: Vec<String>,
    /// Set once, when the row is first inserted
    pub created_at: DateTime<Utc>,
    /// Refreshed on every save
    pub updated_at: DateTime<Utc>,
    /// Whitespace-delimited token count of `content`, recomputed on save
    pub word_count: u32,
    pub is_locked: bool,
    /// Digest of the lock password; never the password itself
    pub lock_password_hash: Option<String>,
    pub password_type: Option<PasswordType>,
    pub locked_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    /// Create an unsaved entry for the given day
    ///
    /// Timestamps are provisional; the entry store overwrites them on save.
    pub fn new(entry_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            entry_date,
            title: None,
            content: None,
            primary_mood: None,
            secondary_mood_1: None,
            secondary_mood_2: None,
            category: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            word_count: 0,
            is_locked: false,
            lock_password_hash: None,
            password_type: None,
            locked_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.primary_mood = Some(mood.into());
        self
    }

    /// Set up to two secondary moods; extra moods are ignored
    pub fn with_secondary_moods<I, M>(mut self, moods: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut moods = moods.into_iter().map(Into::into);
        self.secondary_mood_1 = moods.next();
        self.secondary_mood_2 = moods.next();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `mood` is the primary mood or one of the secondary moods
    pub fn has_mood(&self, mood: &str) -> bool {
        [&self.primary_mood, &self.secondary_mood_1, &self.secondary_mood_2]
            .into_iter()
            .any(|m| m.as_deref() == Some(mood))
    }

    /// The secondary moods that are set, in order
    pub fn secondary_moods(&self) -> Vec<&str> {
        [&self.secondary_mood_1, &self.secondary_mood_2]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .collect()
    }

    /// Recompute `word_count` from the current content
    pub fn refresh_word_count(&mut self) {
        self.word_count = count_words(self.content.as_deref());
    }

    /// Drop every lock field, leaving the entry readable
    pub fn clear_lock(&mut self) {
        self.is_locked = false;
        self.lock_password_hash = None;
        self.password_type = None;
        self.locked_at = None;
    }

    /// A copy safe to hand out without the password
    ///
    /// Locked entries lose their title, content and lock hash; the date,
    /// moods and lock metadata stay. Unlocked entries are returned as-is.
    pub fn redacted(&self) -> Self {
        let mut entry = self.clone();
        if entry.is_locked {
            entry.title = None;
            entry.content = None;
            entry.lock_password_hash = None;
        }
        entry
    }

    /// Check field sizes before the entry is persisted
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            if title.chars().count() > MAX_TITLE_LEN {
                return Err(DomainError::InvalidValue {
                    message: format!("Title cannot be longer than {} characters", MAX_TITLE_LEN),
                });
            }
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(DomainError::InvalidTagName("Tag names cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Number of whitespace-delimited tokens; absent content counts as zero
pub fn count_words(content: Option<&str>) -> u32 {
    content.map_or(0, |text| text.split_whitespace().count() as u32)
}
