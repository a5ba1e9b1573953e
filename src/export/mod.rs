/// Export of journal entries to files
///
/// Writers take entries in the order given; filtering and ordering are the
/// caller's job. Missing parent directories of the destination are created.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::JournalEntry;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize entries: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    /// Render entries into the file contents for this format
    pub fn render(&self, entries: &[JournalEntry]) -> Result<String, ExportError> {
        match self {
            ExportFormat::Csv => Ok(render_csv(entries)),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            ExportFormat::Text => Ok(render_text(entries)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

const CSV_HEADER: &str = "Date,Title,Mood,WordCount,Content";

/// Quote a CSV field, doubling embedded quotes and flattening newlines
fn csv_field(value: Option<&str>) -> String {
    let flattened = value
        .unwrap_or_default()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ");
    format!("\"{}\"", flattened.replace('"', "\"\""))
}

fn render_csv(entries: &[JournalEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for entry in entries {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            entry.entry_date.format("%Y-%m-%d"),
            csv_field(entry.title.as_deref()),
            csv_field(entry.primary_mood.as_deref()),
            entry.word_count,
            csv_field(entry.content.as_deref()),
        );
    }

    out
}

fn render_text(entries: &[JournalEntry]) -> String {
    let mut out = String::new();

    for entry in entries {
        let _ = writeln!(out, "Date: {}", entry.entry_date.format("%Y-%m-%d"));
        let _ = writeln!(out, "Title: {}", entry.title.as_deref().unwrap_or_default());
        let _ = writeln!(out, "Mood: {}", entry.primary_mood.as_deref().unwrap_or_default());
        out.push_str("---\n");
        let _ = writeln!(out, "{}", entry.content.as_deref().unwrap_or_default());
        out.push('\n');
    }

    out
}

/// Write `entries` to `path` in `format` and return the written path
pub async fn export_entries(
    entries: &[JournalEntry],
    format: ExportFormat,
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let contents = format.render(entries)?;
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, contents).await.map_err(io_error)?;

    tracing::info!("Exported {} entries as {:?} to {}", entries.len(), format, path.display());
    Ok(path.to_path_buf())
}
