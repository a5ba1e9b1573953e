/// Streak recomputation and missed-day reports
///
/// The streak summary is derived from the full entry list on request and
/// cached as a single row. Nothing updates it automatically when entries
/// change; callers recompute after writes.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::domain::{self, Streak};
use crate::services::{EntryStore, JournalError};
use crate::storage::JournalStorage;

pub struct StreakCalculator<S> {
    entries: EntryStore<S>,
    storage: Arc<S>,
}

impl<S> Clone for StreakCalculator<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: JournalStorage> StreakCalculator<S> {
    pub fn new(entries: EntryStore<S>, storage: Arc<S>) -> Self {
        Self { entries, storage }
    }

    /// The cached streak, or an empty one if none was ever computed
    pub async fn current(&self) -> Result<Streak, JournalError> {
        Ok(self.storage.load_streak().await?.unwrap_or_else(Streak::empty))
    }

    /// Recompute against today's local date and persist the result
    pub async fn recompute(&self) -> Result<Streak, JournalError> {
        self.recompute_as_of(Local::now().date_naive()).await
    }

    /// Recompute with an explicit "today" and persist the result
    pub async fn recompute_as_of(&self, today: NaiveDate) -> Result<Streak, JournalError> {
        let entries = self.entries.get_all().await?;
        let streak = Streak::calculate_from_entries(&entries, today);

        self.storage.store_streak(&streak).await?;
        tracing::debug!(
            "Recomputed streak as of {}: current {}, longest {}, {} entries",
            today,
            streak.current_streak,
            streak.longest_streak,
            streak.total_entries
        );

        Ok(streak)
    }

    /// Days in `[start, end]` without an entry, oldest first
    pub async fn missed_days(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, JournalError> {
        let entries = self.entries.get_all().await?;
        Ok(domain::missed_days(&entries, start, end))
    }
}
