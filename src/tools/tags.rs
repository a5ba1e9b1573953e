/// Tool for browsing tags

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::Tag;
use crate::{AppError, JournalApp};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TagsParams {
    /// List the suggested tag names instead of the ones in use
    #[serde(default)]
    pub predefined: bool,
    /// Only the N most used tags
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub success: bool,
    pub message: String,
    pub tags: Vec<Tag>,
}

pub async fn list_tags(app: &JournalApp, params: TagsParams) -> Result<TagsResponse, AppError> {
    if params.predefined {
        return Ok(TagsResponse {
            success: true,
            message: format!("🏷️ Suggested tags: {}", app.tags().predefined().join(", ")),
            tags: Vec::new(),
        });
    }

    let tags = match params.limit {
        Some(limit) => app.tags().most_used(limit).await?,
        None => app.tags().get_all().await?,
    };

    let message = if tags.is_empty() {
        "🏷️ No tags used yet".to_string()
    } else {
        let lines: Vec<String> = tags
            .iter()
            .map(|t| format!("  {} ({} uses)", t.name, t.usage_count))
            .collect();
        format!("🏷️ {} tags\n{}", tags.len(), lines.join("\n"))
    };

    Ok(TagsResponse {
        success: true,
        message,
        tags,
    })
}
