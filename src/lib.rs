/// Public library interface for the Journal MCP server
///
/// This module wires the journal services around one shared storage handle
/// and exports the types that the binary and the tests use.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub mod analytics;
pub mod config;
pub mod domain;
pub mod export;
pub mod mcp;
pub mod services;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use analytics::{AnalyticsAggregator, AnalyticsReport, DateRange};
pub use domain::*;
pub use export::{ExportError, ExportFormat};
pub use services::{
    EntryAccess, EntryStore, JournalError, LockService, PinGate, SearchEngine, SearchQuery,
    StreakCalculator, TagService,
};
pub use storage::{CredentialStore, JournalStorage, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error("Database error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The journal with every service wired to one storage backend
///
/// Services are cheap handles sharing the same storage; the entry store's
/// save lock is shared by the lock service and the streak calculator too.
pub struct JournalApp<S = SqliteStorage> {
    entries: EntryStore<S>,
    locks: LockService<S>,
    search: SearchEngine<S>,
    streaks: StreakCalculator<S>,
    analytics: AnalyticsAggregator<S>,
    tags: TagService<S>,
    pin: PinGate<S>,
    session: UserSession,
}

impl JournalApp<SqliteStorage> {
    /// Open the journal database at `db_path`
    ///
    /// The schema is created or migrated before this returns.
    pub async fn open(db_path: PathBuf) -> Result<Self, AppError> {
        tracing::info!("Initializing journal with database: {:?}", db_path);
        let storage = SqliteStorage::open(db_path).await?;
        Ok(Self::with_storage(Arc::new(storage)))
    }

    /// A journal backed by a private in-memory database
    pub fn in_memory() -> Result<Self, AppError> {
        let storage = SqliteStorage::open_in_memory()?;
        Ok(Self::with_storage(Arc::new(storage)))
    }

    /// Run the MCP server over stdin/stdout until the input closes
    pub async fn run(self) -> Result<(), AppError> {
        let total = self.entries.count().await?;
        tracing::info!("Journal ready with {} existing entries", total);

        let mut server = mcp::McpServer::new(self);
        server.run().await
    }
}

impl<S> JournalApp<S>
where
    S: JournalStorage + CredentialStore,
{
    pub fn with_storage(storage: Arc<S>) -> Self {
        let entries = EntryStore::new(Arc::clone(&storage));

        Self {
            locks: LockService::new(entries.clone()),
            search: SearchEngine::new(Arc::clone(&storage)),
            streaks: StreakCalculator::new(entries.clone(), Arc::clone(&storage)),
            analytics: AnalyticsAggregator::new(Arc::clone(&storage)),
            tags: TagService::new(Arc::clone(&storage)),
            pin: PinGate::new(storage),
            entries,
            session: UserSession::new(),
        }
    }

    pub fn entries(&self) -> &EntryStore<S> {
        &self.entries
    }

    pub fn locks(&self) -> &LockService<S> {
        &self.locks
    }

    pub fn search(&self) -> &SearchEngine<S> {
        &self.search
    }

    pub fn streaks(&self) -> &StreakCalculator<S> {
        &self.streaks
    }

    pub fn analytics(&self) -> &AnalyticsAggregator<S> {
        &self.analytics
    }

    pub fn tags(&self) -> &TagService<S> {
        &self.tags
    }

    pub fn pin(&self) -> &PinGate<S> {
        &self.pin
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut UserSession {
        &mut self.session
    }
}
