/// Database location and log level resolution
///
/// An explicit path wins. Otherwise the first writable directory from a list
/// of well-known locations is used, with the system temp directory as the
/// last resort.

use std::path::{Path, PathBuf};

pub const DATABASE_FILE: &str = "journal.db";
pub const DATABASE_ENV: &str = "JOURNAL_DB";

/// Settings the binary needs before it can open the journal
///
/// Logging is configured separately through `log_filter`, before this is
/// resolved, so warnings from path resolution are not lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn resolve(database: Option<PathBuf>) -> std::io::Result<Self> {
        Ok(Self {
            database_path: resolve_database_path(database)?,
        })
    }
}

/// Candidate directories for the database, most preferred first
fn candidate_dirs() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".journal_mcp")),
        dirs::data_dir().map(|p| p.join("journal_mcp")),
        dirs::config_dir().map(|p| p.join("journal_mcp")),
        std::env::current_dir().ok().map(|p| p.join(".journal_mcp")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Whether `dir` can be created and written to
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let test_file = dir.join(".write_test");
    let writable = std::fs::write(&test_file, b"ok").is_ok();
    let _ = std::fs::remove_file(&test_file);
    writable
}

/// Pick the default database path
pub fn default_database_path() -> std::io::Result<PathBuf> {
    if let Some(dir) = candidate_dirs().into_iter().find(|d| is_writable_dir(d)) {
        return Ok(dir.join(DATABASE_FILE));
    }

    let temp_dir = std::env::temp_dir().join("journal_mcp");
    std::fs::create_dir_all(&temp_dir)?;
    tracing::warn!("Using temporary directory for database: {}", temp_dir.display());
    Ok(temp_dir.join(DATABASE_FILE))
}

/// Resolve the database path, creating the parent of an explicit path
pub fn resolve_database_path(explicit: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match explicit {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(path)
        }
        None => default_database_path(),
    }
}

/// Default log filter for the given verbosity flags
///
/// `--verbose` implies debug output and takes precedence over `--debug`.
pub fn log_filter(debug: bool, verbose: bool) -> String {
    let level = if verbose {
        "debug"
    } else if debug {
        "info"
    } else {
        "warn"
    };
    format!("journal_mcp={}", level)
}
