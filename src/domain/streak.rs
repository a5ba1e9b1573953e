/// Streak calculation and tracking functionality
///
/// This module defines the Streak summary that is cached in storage, and the
/// pure functions that derive it from the full set of journal entries.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::JournalEntry;

/// Fixed primary key of the singleton streak row
pub const STREAK_ROW_ID: i64 = 1;

/// Calculated writing streak for the whole journal
///
/// There is exactly one of these. It is recomputed wholesale from the
/// entries, so it can go stale between a save and the next recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive days with an entry, ending today
    pub current_streak: u32,
    /// Longest run of consecutive days ever written
    pub longest_streak: u32,
    /// Date of the most recent entry (None if there are no entries)
    pub last_entry_date: Option<NaiveDate>,
    pub total_entries: u32,
}

impl Streak {
    /// A streak record for a journal with no entries
    pub fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_entry_date: None,
            total_entries: 0,
        }
    }

    /// Derive the streak from entries ordered by date, newest first
    ///
    /// `today` anchors the current streak: a journal whose newest entry is
    /// yesterday has a current streak of zero.
    pub fn calculate_from_entries(entries: &[JournalEntry], today: NaiveDate) -> Self {
        let Some(newest) = entries.first() else {
            return Self::empty();
        };

        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.entry_date).collect();

        Self {
            current_streak: current_streak(&dates, today),
            longest_streak: longest_streak(&dates),
            last_entry_date: Some(newest.entry_date),
            total_entries: entries.len() as u32,
        }
    }

    /// Get a short encouragement based on the current streak
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "No entry today yet. A few lines are enough to start a streak.".to_string(),
            1 => "You wrote today. Come back tomorrow to keep it going.".to_string(),
            2..=6 => format!("{} days in a row. The habit is forming.", self.current_streak),
            7..=29 => format!("{} days straight. Writing is part of your routine now.", self.current_streak),
            _ => format!("{} consecutive days. Remarkable consistency!", self.current_streak),
        }
    }
}

/// Walk the newest-first dates counting the run that ends today
///
/// Dates after today never match the expected day and are skipped; the first
/// date before the expected day is a gap and ends the walk.
pub fn current_streak(dates_desc: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut expected = today;

    for date in dates_desc {
        if *date == expected {
            streak += 1;
            match expected.pred_opt() {
                Some(previous) => expected = previous,
                None => break,
            }
        } else if *date < expected {
            break;
        }
    }

    streak
}

/// Longest run of consecutive calendar days in newest-first dates
pub fn longest_streak(dates_desc: &[NaiveDate]) -> u32 {
    let Some(first) = dates_desc.first() else {
        return 0;
    };

    let mut longest = 1;
    let mut current = 1;
    let mut previous = *first;

    for date in dates_desc.iter().skip(1) {
        if previous.pred_opt() == Some(*date) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
        previous = *date;
    }

    longest
}

/// Every day in `[start, end]` that has no entry, ascending
///
/// An inverted range has no days and so nothing is missing.
pub fn missed_days(entries: &[JournalEntry], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let written: HashSet<NaiveDate> = entries
        .iter()
        .map(|e| e.entry_date)
        .filter(|d| *d >= start && *d <= end)
        .collect();

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !written.contains(day))
        .collect()
}
