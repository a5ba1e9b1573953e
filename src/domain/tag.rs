/// Tag entity
///
/// Tags live in their own table with a usage counter. They are only loosely
/// related to entries: an entry carries tag names, not tag ids, and the
/// counter moves only through explicit create-or-get calls.

use serde::{Deserialize, Serialize};
use crate::domain::{TagId, DomainError};

const MAX_TAG_LEN: usize = 50;

/// Suggested tag names offered before the user has any tags of their own
pub const PREDEFINED_TAGS: [&str; 31] = [
    "Work", "Career", "Studies", "Family", "Friends", "Relationships",
    "Health", "Fitness", "Personal Growth", "Self-care", "Hobbies", "Travel",
    "Nature", "Finance", "Spirituality", "Birthday", "Holiday", "Vacation",
    "Celebration", "Exercise", "Reading", "Writing", "Cooking", "Meditation",
    "Yoga", "Music", "Shopping", "Parenting", "Projects", "Planning", "Reflection",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// None until inserted
    pub id: Option<TagId>,
    /// Unique across the tag table
    pub name: String,
    /// Optional grouping label (e.g. "Work", "Health")
    pub category: Option<String>,
    pub usage_count: u32,
}

impl Tag {
    /// Create a fresh tag that has been used once
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = Self::normalize_name(name)?;
        Ok(Self {
            id: None,
            name,
            category: None,
            usage_count: 1,
        })
    }

    /// Trim a tag name and check it is usable
    pub fn normalize_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidTagName("Tag name cannot be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_TAG_LEN {
            return Err(DomainError::InvalidTagName(format!(
                "Tag name cannot be longer than {} characters",
                MAX_TAG_LEN
            )));
        }

        Ok(trimmed.to_string())
    }
}
