/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier wrappers, the password types used by
/// entry locks, the fixed mood catalogue and the date normalization helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Unique identifier for a journal entry
///
/// Assigned by the storage layer on first insertion and stable afterwards.
/// Wrapping the raw integer keeps entry and tag ids from being mixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a tag row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub i64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rule set a lock password was validated against
///
/// Stored alongside the hash so the client knows which keypad to show
/// when asking for the password again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PasswordType {
    /// At least 8 characters with upper, lower and a digit
    Strong,
    /// 4 to 8 digits
    #[serde(rename = "PIN")]
    Pin,
    /// At least 4 characters, nothing else checked
    Simple,
}

impl PasswordType {
    /// Every supported password type, in display order
    pub const ALL: [PasswordType; 3] = [PasswordType::Strong, PasswordType::Pin, PasswordType::Simple];

    /// Name used for storage and for tool arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordType::Strong => "Strong",
            PasswordType::Pin => "PIN",
            PasswordType::Simple => "Simple",
        }
    }
}

impl fmt::Display for PasswordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Strong" | "strong" => Ok(PasswordType::Strong),
            "PIN" | "Pin" | "pin" => Ok(PasswordType::Pin),
            "Simple" | "simple" => Ok(PasswordType::Simple),
            other => Err(DomainError::InvalidValue {
                message: format!("Unknown password type '{}'. Valid options: Strong, PIN, Simple", other),
            }),
        }
    }
}

/// Broad grouping of moods used by the analytics aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoodCategory {
    Positive,
    Neutral,
    Negative,
}

const POSITIVE_MOODS: [&str; 5] = ["Happy", "Excited", "Relaxed", "Grateful", "Confident"];
const NEUTRAL_MOODS: [&str; 5] = ["Calm", "Thoughtful", "Curious", "Nostalgic", "Bored"];
const NEGATIVE_MOODS: [&str; 5] = ["Sad", "Angry", "Stressed", "Lonely", "Anxious"];

impl MoodCategory {
    pub const ALL: [MoodCategory; 3] = [MoodCategory::Positive, MoodCategory::Neutral, MoodCategory::Negative];

    /// Look up the category of a mood name
    ///
    /// Matching is exact and case-sensitive. Moods outside the catalogue
    /// have no category.
    pub fn of(mood: &str) -> Option<MoodCategory> {
        MoodCategory::ALL
            .into_iter()
            .find(|category| category.moods().contains(&mood))
    }

    /// The five named moods belonging to this category
    pub fn moods(&self) -> &'static [&'static str] {
        match self {
            MoodCategory::Positive => &POSITIVE_MOODS,
            MoodCategory::Neutral => &NEUTRAL_MOODS,
            MoodCategory::Negative => &NEGATIVE_MOODS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Positive => "Positive",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Negative => "Negative",
        }
    }

    /// Parse a category name ("Positive", "Neutral", "Negative")
    pub fn from_name(name: &str) -> Option<MoodCategory> {
        MoodCategory::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All fifteen catalogue moods, positive first
pub fn all_moods() -> Vec<&'static str> {
    MoodCategory::ALL
        .iter()
        .flat_map(|category| category.moods().iter().copied())
        .collect()
}

/// Moods related to the input
///
/// The input may be a category name or a mood name. Either way the moods of
/// the matching category are returned; anything unknown yields the whole
/// catalogue.
pub fn related_moods(input: &str) -> Vec<&'static str> {
    match MoodCategory::from_name(input).or_else(|| MoodCategory::of(input)) {
        Some(category) => category.moods().to_vec(),
        None => all_moods(),
    }
}

/// Reduce a timestamp to the calendar day it falls on
pub fn day_of<Tz: chrono::TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.date_naive()
}

/// Parse user supplied date text into an entry date
///
/// Accepts a plain `YYYY-MM-DD` date or a timestamp (RFC 3339 or
/// `YYYY-MM-DD HH:MM:SS`); any time-of-day is discarded.
pub fn parse_entry_date(input: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(day_of(&timestamp));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }

    Err(DomainError::InvalidDate(format!(
        "'{}' is not a date (expected YYYY-MM-DD)",
        input
    )))
}
