/// Tools for streaks and missed days

use chrono::{Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Streak};
use crate::tools::{parse_optional_date, today, NoParams};
use crate::{AppError, JournalApp};

/// Days looked back by journal_missed_days when no start date is given
const DEFAULT_LOOKBACK_DAYS: i64 = 30;

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub success: bool,
    pub message: String,
    pub streak: Streak,
}

/// Recompute the streak from the current entries and report it
pub async fn streak_status(app: &JournalApp, _params: NoParams) -> Result<StreakResponse, AppError> {
    let streak = app.streaks().recompute().await?;

    let last = streak
        .last_entry_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "never".to_string());

    Ok(StreakResponse {
        success: true,
        message: format!(
            "🔥 Current streak: {} days\n🏆 Longest streak: {} days\n📝 Total entries: {}\n📅 Last entry: {}\n\n{}",
            streak.current_streak,
            streak.longest_streak,
            streak.total_entries,
            last,
            streak.motivational_message()
        ),
        streak,
    })
}

/// Range to check for days without an entry
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct MissedDaysParams {
    /// First day to check (YYYY-MM-DD); defaults to 30 days before the end
    pub start_date: Option<String>,
    /// Last day to check (YYYY-MM-DD); defaults to today
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MissedDaysResponse {
    pub success: bool,
    pub message: String,
    pub missed_days: Vec<NaiveDate>,
}

pub async fn missed_days(app: &JournalApp, params: MissedDaysParams) -> Result<MissedDaysResponse, AppError> {
    let end = parse_optional_date(params.end_date.as_deref())?.unwrap_or_else(today);
    let start = parse_optional_date(params.start_date.as_deref())?
        .unwrap_or(end - Duration::days(DEFAULT_LOOKBACK_DAYS));

    if start > end {
        return Err(DomainError::InvalidDate(format!(
            "Start date {} is after end date {}",
            start, end
        ))
        .into());
    }

    let missed = app.streaks().missed_days(start, end).await?;

    let message = if missed.is_empty() {
        format!("🎯 No missed days between {} and {}", start, end)
    } else {
        let days: Vec<String> = missed.iter().map(|d| d.to_string()).collect();
        format!(
            "📅 {} missed days between {} and {}:\n{}",
            missed.len(),
            start,
            end,
            days.join(", ")
        )
    };

    Ok(MissedDaysResponse {
        success: true,
        message,
        missed_days: missed,
    })
}
