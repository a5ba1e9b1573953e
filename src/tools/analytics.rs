/// Tool for mood, tag and writing analytics

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsReport, DateRange, DEFAULT_TOP_TAGS};
use crate::tools::parse_optional_date;
use crate::{AppError, JournalApp};

/// Optional date range and tag count for the report
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct AnalyticsParams {
    /// First day to include (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// How many tags to list (default 10)
    pub top_tags: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub message: String,
    pub report: AnalyticsReport,
}

pub async fn journal_analytics(app: &JournalApp, params: AnalyticsParams) -> Result<AnalyticsResponse, AppError> {
    let range = DateRange::new(
        parse_optional_date(params.start_date.as_deref())?,
        parse_optional_date(params.end_date.as_deref())?,
    );
    let report = app
        .analytics()
        .report(range, params.top_tags.unwrap_or(DEFAULT_TOP_TAGS))
        .await?;

    Ok(AnalyticsResponse {
        success: true,
        message: format_report(&report),
        report,
    })
}

fn format_counts<K: std::fmt::Display>(counts: &[(K, usize)]) -> String {
    if counts.is_empty() {
        return "  (none)".to_string();
    }
    counts
        .iter()
        .map(|(key, count)| format!("  {}: {}", key, count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_report(report: &AnalyticsReport) -> String {
    if report.total_entries == 0 {
        return "📊 No entries in this range yet".to_string();
    }

    let percentages = report
        .category_percentages
        .iter()
        .map(|(category, pct)| format!("  {}: {:.1}%", category, pct))
        .collect::<Vec<_>>();

    format!(
        "📊 **Journal Analytics** ({} entries)\n\n\
         Most frequent mood: {}\n\
         Average words per entry: {:.1}\n\n\
         Moods:\n{}\n\n\
         Mood categories:\n{}\n\n\
         Top tags:\n{}\n\n\
         Categories:\n{}",
        report.total_entries,
        report.most_frequent_mood.as_deref().unwrap_or("none recorded"),
        report.average_word_count,
        format_counts(&report.mood_distribution),
        format_counts(
            &report
                .mood_category_distribution
                .iter()
                .map(|(category, count)| (category.as_str(), *count))
                .collect::<Vec<_>>()
        ),
        format_counts(&report.most_used_tags),
        if percentages.is_empty() {
            "  (none)".to_string()
        } else {
            percentages.join("\n")
        },
    )
}
