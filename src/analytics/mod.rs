/// Analytics over journal entries
///
/// Every aggregate works on the same input: the full entry list, narrowed
/// to an optional inclusive date range. The aggregates are total functions;
/// an empty range yields zeros and empty collections.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{JournalEntry, MoodCategory};
use crate::services::JournalError;
use crate::storage::JournalStorage;

/// Number of tags reported when the caller does not ask for a specific count
pub const DEFAULT_TOP_TAGS: usize = 10;

/// Optional inclusive date bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// No bounds: every entry is included
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn filter(&self, entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
        entries.into_iter().filter(|e| self.contains(e.entry_date)).collect()
    }
}

/// Every aggregate for one range, bundled for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_entries: usize,
    pub mood_distribution: Vec<(String, usize)>,
    pub mood_category_distribution: Vec<(MoodCategory, usize)>,
    pub most_frequent_mood: Option<String>,
    pub most_used_tags: Vec<(String, usize)>,
    pub average_word_count: f64,
    pub word_count_trend: BTreeMap<NaiveDate, u32>,
    pub category_breakdown: Vec<(String, usize)>,
    pub category_percentages: Vec<(String, f64)>,
}

/// Count occurrences and order by count, highest first
///
/// Keys with equal counts keep the order in which they were first seen.
fn ranked_counts<I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for key in keys {
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|key| {
            let count = counts.get(&key).copied().unwrap_or_default();
            (key, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// A field value that is present and not empty
fn recorded(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Entries per primary mood, most common first; empty moods are skipped
pub fn mood_distribution(entries: &[JournalEntry]) -> Vec<(String, usize)> {
    ranked_counts(entries.iter().filter_map(|e| recorded(e.primary_mood.as_deref())))
}

/// Entries per mood category, always all three in catalogue order
///
/// Moods outside the catalogue are not counted anywhere here.
pub fn mood_category_distribution(entries: &[JournalEntry]) -> Vec<(MoodCategory, usize)> {
    let mut counts: BTreeMap<MoodCategory, usize> = BTreeMap::new();

    for category in entries
        .iter()
        .filter_map(|e| e.primary_mood.as_deref())
        .filter_map(MoodCategory::of)
    {
        *counts.entry(category).or_insert(0) += 1;
    }

    MoodCategory::ALL
        .iter()
        .map(|category| (*category, counts.get(category).copied().unwrap_or_default()))
        .collect()
}

/// The first mood of the distribution, if any entry has a mood
pub fn most_frequent_mood(entries: &[JournalEntry]) -> Option<String> {
    mood_distribution(entries).into_iter().next().map(|(mood, _)| mood)
}

/// Top `limit` tag names across every entry's tag list
pub fn most_used_tags(entries: &[JournalEntry], limit: usize) -> Vec<(String, usize)> {
    let mut ranked = ranked_counts(entries.iter().flat_map(|e| e.tags.iter().cloned()));
    ranked.truncate(limit);
    ranked
}

pub fn average_word_count(entries: &[JournalEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }

    let total: u64 = entries.iter().map(|e| u64::from(e.word_count)).sum();
    total as f64 / entries.len() as f64
}

/// Word count per day, ascending by date
///
/// Entries are visited oldest first, so a later entry for the same day wins.
pub fn word_count_trend(entries: &[JournalEntry]) -> BTreeMap<NaiveDate, u32> {
    let mut ascending: Vec<&JournalEntry> = entries.iter().collect();
    ascending.sort_by_key(|e| e.entry_date);

    ascending
        .into_iter()
        .map(|e| (e.entry_date, e.word_count))
        .collect()
}

/// Entries per category, most common first; uncategorized entries are skipped
pub fn category_breakdown(entries: &[JournalEntry]) -> Vec<(String, usize)> {
    ranked_counts(entries.iter().filter_map(|e| recorded(e.category.as_deref())))
}

/// The category breakdown as percentages of all categorized entries
pub fn category_percentages(entries: &[JournalEntry]) -> Vec<(String, f64)> {
    let breakdown = category_breakdown(entries);
    let total: usize = breakdown.iter().map(|(_, count)| count).sum();

    if total == 0 {
        return Vec::new();
    }

    breakdown
        .into_iter()
        .map(|(category, count)| (category, count as f64 / total as f64 * 100.0))
        .collect()
}

pub fn build_report(entries: &[JournalEntry], range: DateRange, top_tags: usize) -> AnalyticsReport {
    AnalyticsReport {
        start_date: range.start,
        end_date: range.end,
        total_entries: entries.len(),
        mood_distribution: mood_distribution(entries),
        mood_category_distribution: mood_category_distribution(entries),
        most_frequent_mood: most_frequent_mood(entries),
        most_used_tags: most_used_tags(entries, top_tags),
        average_word_count: average_word_count(entries),
        word_count_trend: word_count_trend(entries),
        category_breakdown: category_breakdown(entries),
        category_percentages: category_percentages(entries),
    }
}

/// Range-filtered aggregates read straight from storage
pub struct AnalyticsAggregator<S> {
    storage: Arc<S>,
}

impl<S> Clone for AnalyticsAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: JournalStorage> AnalyticsAggregator<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    async fn entries_in(&self, range: DateRange) -> Result<Vec<JournalEntry>, JournalError> {
        let entries = self.storage.list_entries().await?;
        Ok(range.filter(entries))
    }

    pub async fn mood_distribution(&self, range: DateRange) -> Result<Vec<(String, usize)>, JournalError> {
        Ok(mood_distribution(&self.entries_in(range).await?))
    }

    pub async fn mood_category_distribution(
        &self,
        range: DateRange,
    ) -> Result<Vec<(MoodCategory, usize)>, JournalError> {
        Ok(mood_category_distribution(&self.entries_in(range).await?))
    }

    pub async fn most_frequent_mood(&self, range: DateRange) -> Result<Option<String>, JournalError> {
        Ok(most_frequent_mood(&self.entries_in(range).await?))
    }

    pub async fn most_used_tags(
        &self,
        range: DateRange,
        limit: usize,
    ) -> Result<Vec<(String, usize)>, JournalError> {
        Ok(most_used_tags(&self.entries_in(range).await?, limit))
    }

    pub async fn average_word_count(&self, range: DateRange) -> Result<f64, JournalError> {
        Ok(average_word_count(&self.entries_in(range).await?))
    }

    pub async fn word_count_trend(&self, range: DateRange) -> Result<BTreeMap<NaiveDate, u32>, JournalError> {
        Ok(word_count_trend(&self.entries_in(range).await?))
    }

    pub async fn category_breakdown(&self, range: DateRange) -> Result<Vec<(String, usize)>, JournalError> {
        Ok(category_breakdown(&self.entries_in(range).await?))
    }

    pub async fn category_percentages(&self, range: DateRange) -> Result<Vec<(String, f64)>, JournalError> {
        Ok(category_percentages(&self.entries_in(range).await?))
    }

    pub async fn total_entries(&self, range: DateRange) -> Result<usize, JournalError> {
        Ok(self.entries_in(range).await?.len())
    }

    /// Every aggregate over one scan of the entry table
    pub async fn report(&self, range: DateRange, top_tags: usize) -> Result<AnalyticsReport, JournalError> {
        let entries = self.entries_in(range).await?;
        tracing::debug!("Building analytics report over {} entries", entries.len());
        Ok(build_report(&entries, range, top_tags))
    }
}
