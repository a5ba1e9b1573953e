/// Tool for exporting entries to a file

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::export::{export_entries, ExportFormat};
use crate::services::SearchQuery;
use crate::tools::parse_optional_date;
use crate::{AppError, JournalApp};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// csv, json or text
    pub format: String,
    /// Destination file; missing directories are created
    pub path: String,
    /// First day to include (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub message: String,
    pub path: PathBuf,
    pub exported: usize,
}

/// Export the entries in a date range, newest first
///
/// Locked entries are written without their title, content or lock hash.
pub async fn export_journal(app: &JournalApp, params: ExportParams) -> Result<ExportResponse, AppError> {
    let format: ExportFormat = params.format.parse()?;
    let query = SearchQuery::new().between(
        parse_optional_date(params.start_date.as_deref())?,
        parse_optional_date(params.end_date.as_deref())?,
    );

    let entries: Vec<_> = app
        .search()
        .search(&query)
        .await?
        .iter()
        .map(|entry| entry.redacted())
        .collect();
    let path = export_entries(&entries, format, &PathBuf::from(params.path)).await?;

    Ok(ExportResponse {
        success: true,
        message: format!("📤 Exported {} entries to {}", entries.len(), path.display()),
        path,
        exported: entries.len(),
    })
}
