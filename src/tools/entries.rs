/// Tools for writing, reading, deleting and listing entries
///
/// This module implements journal_save, journal_get, journal_delete and
/// journal_list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{EntryId, JournalEntry, DEFAULT_PAGE_SIZE};
use crate::services::{EntryAccess, JournalError};
use crate::tools::{entry_details, entry_line, non_blank, parse_optional_date, today};
use crate::{AppError, JournalApp};

/// Parameters for writing the entry of one day
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SaveEntryParams {
    /// Day of the entry (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Primary mood, e.g. Happy, Calm, Stressed
    pub mood: Option<String>,
    /// Up to two additional moods
    #[serde(default)]
    pub secondary_moods: Vec<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveEntryResponse {
    pub success: bool,
    pub message: String,
    pub entry_id: Option<EntryId>,
    pub current_streak: u32,
}

/// Save the entry for a day, replacing whatever was written for it before
///
/// A locked entry must be unlocked before it can be rewritten. Tags named
/// here are counted in the tag table and the streak is recomputed.
pub async fn save_entry(app: &JournalApp, params: SaveEntryParams) -> Result<SaveEntryResponse, AppError> {
    let date = parse_optional_date(params.date.as_deref())?.unwrap_or_else(today);

    if let Some(existing) = app.entries().get_by_date(date).await? {
        if existing.is_locked {
            return Err(JournalError::ValidationFailed {
                issues: vec![format!("Entry for {} is locked; unlock it before editing", date)],
            }
            .into());
        }
    }

    let tags: Vec<String> = params
        .tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let mut entry = JournalEntry::new(date)
        .with_secondary_moods(params.secondary_moods.into_iter().filter(|m| !m.trim().is_empty()))
        .with_tags(tags.clone());
    entry.title = non_blank(params.title);
    entry.content = params.content;
    entry.primary_mood = non_blank(params.mood);
    entry.category = non_blank(params.category);

    let saved = app.entries().save(entry).await?;

    for tag in &tags {
        app.tags().create_or_get(tag).await?;
    }
    let streak = app.streaks().recompute().await?;

    Ok(SaveEntryResponse {
        success: true,
        message: format!(
            "✍️ Saved entry for {} ({} words). {}",
            saved.entry_date,
            saved.word_count,
            streak.motivational_message()
        ),
        entry_id: saved.id,
        current_streak: streak.current_streak,
    })
}

/// Parameters for reading one entry, by id or by date
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetEntryParams {
    pub entry_id: Option<i64>,
    /// Day of the entry (YYYY-MM-DD); used when no id is given
    pub date: Option<String>,
    /// Password for a locked entry
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetEntryResponse {
    pub success: bool,
    pub message: String,
    pub entry: Option<JournalEntry>,
}

pub async fn get_entry(app: &JournalApp, params: GetEntryParams) -> Result<GetEntryResponse, AppError> {
    let entry_id = match (params.entry_id, parse_optional_date(params.date.as_deref())?) {
        (Some(id), _) => EntryId(id),
        (None, Some(date)) => match app.entries().get_by_date(date).await?.and_then(|e| e.id) {
            Some(id) => id,
            None => {
                return Ok(GetEntryResponse {
                    success: false,
                    message: format!("No entry written for {}", date),
                    entry: None,
                })
            }
        },
        (None, None) => {
            return Err(JournalError::ValidationFailed {
                issues: vec!["Either entry_id or date is required".to_string()],
            }
            .into())
        }
    };

    let access = app
        .locks()
        .read_if_unlocked(entry_id, params.password.as_deref())
        .await?;

    Ok(match access {
        EntryAccess::Readable(entry) => GetEntryResponse {
            success: true,
            message: entry_details(&entry),
            entry: Some(entry),
        },
        EntryAccess::Inaccessible => GetEntryResponse {
            success: false,
            message: format!("🔒 Entry {} is locked. Supply its password to read it.", entry_id),
            entry: None,
        },
    })
}

/// Parameters for deleting the entry of one day
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DeleteEntryParams {
    /// Day of the entry to delete (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteEntryResponse {
    pub success: bool,
    pub message: String,
    pub deleted: bool,
}

/// Delete the entry for a day; deleting a day without an entry succeeds
pub async fn delete_entry(app: &JournalApp, params: DeleteEntryParams) -> Result<DeleteEntryResponse, AppError> {
    let date = crate::domain::parse_entry_date(&params.date)?;
    let deleted = app.entries().delete(date).await?;
    app.streaks().recompute().await?;

    let message = if deleted {
        format!("🗑️ Deleted the entry for {}", date)
    } else {
        format!("No entry for {}, nothing deleted", date)
    };

    Ok(DeleteEntryResponse {
        success: true,
        message,
        deleted,
    })
}

/// Parameters for paging through entries, newest first
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListEntriesParams {
    /// 1-indexed page number (default 1)
    pub page: Option<u32>,
    /// Entries per page (default 10)
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub success: bool,
    pub message: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_entries: u32,
}

pub async fn list_entries(app: &JournalApp, params: ListEntriesParams) -> Result<ListEntriesResponse, AppError> {
    let page = app
        .entries()
        .get_paginated(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;

    let message = if page.total_items == 0 {
        "No entries yet. Write your first one with journal_save!".to_string()
    } else if page.items.is_empty() {
        format!("Page {} is empty (there are {} pages)", page.current_page, page.total_pages)
    } else {
        let lines: Vec<String> = page.items.iter().map(entry_line).collect();
        format!(
            "📚 Page {} of {} ({} entries)\n\n{}",
            page.current_page,
            page.total_pages,
            page.total_items,
            lines.join("\n")
        )
    };

    Ok(ListEntriesResponse {
        success: true,
        message,
        current_page: page.current_page,
        total_pages: page.total_pages,
        total_entries: page.total_items,
    })
}
