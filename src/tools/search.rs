/// Tool for searching entries

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::SearchQuery;
use crate::tools::{entry_line, non_blank, parse_optional_date};
use crate::{AppError, JournalApp};

/// Search criteria; every supplied criterion must match
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SearchEntriesParams {
    /// Case-insensitive text to find in titles or content
    pub text: Option<String>,
    /// Earliest date to include (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Primary or secondary mood to match
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Exact category to match
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchEntriesResponse {
    pub success: bool,
    pub message: String,
    pub total_matches: usize,
}

pub async fn search_entries(
    app: &JournalApp,
    params: SearchEntriesParams,
) -> Result<SearchEntriesResponse, AppError> {
    let start_date = parse_optional_date(params.start_date.as_deref())?;
    let end_date = parse_optional_date(params.end_date.as_deref())?;

    let mut query = SearchQuery::new().between(start_date, end_date).tags(params.tags);
    let text = non_blank(params.text);
    if let Some(text) = &text {
        query = query.text(text.clone());
    }
    if let Some(mood) = non_blank(params.mood) {
        query = query.mood(mood);
    }

    let mut results = app.search().search(&query).await?;
    // Text inside a locked entry must not be confirmable without its password
    if text.is_some() {
        results.retain(|e| !e.is_locked);
    }
    if let Some(category) = non_blank(params.category) {
        results.retain(|e| e.category.as_deref() == Some(category.as_str()));
    }

    let message = if results.is_empty() {
        "🔍 No entries match your search".to_string()
    } else {
        let lines: Vec<String> = results.iter().map(entry_line).collect();
        format!("🔍 {} matching entries\n\n{}", results.len(), lines.join("\n"))
    };

    Ok(SearchEntriesResponse {
        success: true,
        message,
        total_matches: results.len(),
    })
}
