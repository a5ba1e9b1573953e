/// Search and filtering over journal entries
///
/// There is no index: every call loads the full entry list, filters it in
/// memory and sorts the survivors newest first.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::JournalEntry;
use crate::services::JournalError;
use crate::storage::JournalStorage;

/// Criteria for a search; all supplied criteria must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring of the title or the content
    pub text: Option<String>,
    /// Inclusive lower bound on the entry date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date
    pub end_date: Option<NaiveDate>,
    /// Matches the primary mood or either secondary mood
    pub mood: Option<String>,
    /// Accepted for callers but not used to narrow results
    pub tags: Vec<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn between(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    fn mood_filter(&self) -> Option<&str> {
        self.mood.as_deref().filter(|m| !m.is_empty())
    }

    fn text_filter(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether any date, mood or tag criterion was supplied
    pub fn has_structured_filters(&self) -> bool {
        self.start_date.is_some()
            || self.end_date.is_some()
            || self.mood_filter().is_some()
            || !self.tags.is_empty()
    }

    /// Filter `entries` and order the result newest first
    ///
    /// The tag list only decides whether the structured filters run; entries
    /// are not narrowed by tag membership.
    pub fn apply(&self, entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
        let mut results = entries;

        if self.has_structured_filters() {
            results.retain(|e| within(e.entry_date, self.start_date, self.end_date));

            if let Some(mood) = self.mood_filter() {
                results.retain(|e| e.has_mood(mood));
            }
        }

        if let Some(needle) = self.text_filter() {
            results.retain(|e| contains_text(e, &needle));
        }

        sort_newest_first(&mut results);
        results
    }
}

fn within(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}

/// `needle` must already be lowercase
fn contains_text(entry: &JournalEntry, needle: &str) -> bool {
    let field_matches = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    };

    field_matches(&entry.title) || field_matches(&entry.content)
}

fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
}

pub struct SearchEngine<S> {
    storage: Arc<S>,
}

impl<S> Clone for SearchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: JournalStorage> SearchEngine<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<JournalEntry>, JournalError> {
        let entries = self.storage.list_entries().await?;
        let results = query.apply(entries);
        tracing::debug!("Search matched {} entries", results.len());
        Ok(results)
    }

    /// Entries whose primary or secondary moods include `mood`
    pub async fn filter_by_mood(&self, mood: &str) -> Result<Vec<JournalEntry>, JournalError> {
        self.filter(|e| e.has_mood(mood)).await
    }

    /// Entries dated within `[start_date, end_date]`
    pub async fn filter_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, JournalError> {
        self.filter(|e| within(e.entry_date, Some(start_date), Some(end_date))).await
    }

    /// Entries whose category is exactly `category`
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<JournalEntry>, JournalError> {
        self.filter(|e| e.category.as_deref() == Some(category)).await
    }

    async fn filter<P>(&self, predicate: P) -> Result<Vec<JournalEntry>, JournalError>
    where
        P: Fn(&JournalEntry) -> bool,
    {
        let mut entries = self.storage.list_entries().await?;
        entries.retain(|e| predicate(e));
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}
