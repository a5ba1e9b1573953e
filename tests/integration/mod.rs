/// Integration tests: services end-to-end over real SQLite databases
use chrono::NaiveDate;
use journal_mcp::JournalApp;

mod entry_store;
mod lock_flow;
mod persistence;
mod read_side;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A fresh journal on a private in-memory database
pub fn app() -> JournalApp {
    JournalApp::in_memory().expect("Failed to open in-memory journal")
}
