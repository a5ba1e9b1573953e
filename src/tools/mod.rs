/// MCP tools for the journal
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call. Each tool has a parameter struct whose JSON schema is published
/// through `tools/list`, a response struct and one async function.

pub mod analytics;
pub mod entries;
pub mod export;
pub mod lock;
pub mod search;
pub mod session;
pub mod streak;
pub mod tags;

pub use analytics::*;
pub use entries::*;
pub use export::*;
pub use lock::*;
pub use search::*;
pub use session::*;
pub use streak::*;
pub use tags::*;

use chrono::{Local, NaiveDate};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{parse_entry_date, DomainError, JournalEntry};

/// Parameters for tools that take no arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Today's date on the local calendar
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an optional date argument; blank strings count as absent
pub(crate) fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(text) => parse_entry_date(text).map(Some),
        None => Ok(None),
    }
}

/// Drop blank strings from optional text arguments
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One-line summary of an entry for listings
///
/// Locked entries show only their date and id.
pub(crate) fn entry_line(entry: &JournalEntry) -> String {
    let id = entry.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());

    if entry.is_locked {
        return format!("🔒 {} (#{}) locked entry", entry.entry_date, id);
    }

    let mut line = format!(
        "📔 {} (#{}) {}",
        entry.entry_date,
        id,
        entry.title.as_deref().unwrap_or("(untitled)")
    );
    if let Some(mood) = &entry.primary_mood {
        line.push_str(&format!(" · {}", mood));
    }
    line.push_str(&format!(" · {} words", entry.word_count));
    line
}

/// Full rendering of a readable entry
pub(crate) fn entry_details(entry: &JournalEntry) -> String {
    let mut out = entry_line(entry);

    let secondary = entry.secondary_moods();
    if !secondary.is_empty() {
        out.push_str(&format!("\nAlso felt: {}", secondary.join(", ")));
    }
    if let Some(category) = &entry.category {
        out.push_str(&format!("\nCategory: {}", category));
    }
    if !entry.tags.is_empty() {
        out.push_str(&format!("\nTags: {}", entry.tags.join(", ")));
    }
    if let Some(content) = &entry.content {
        out.push_str(&format!("\n\n{}", content));
    }
    out
}
