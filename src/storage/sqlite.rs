/// SQLite implementation of the journal storage interface
///
/// This module provides the concrete SQLite implementation for storing and
/// retrieving entries, tags, the streak summary and credentials. It handles
/// all SQL queries and data conversion.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{
    JournalEntry, Tag, Streak, EntryId, TagId, PasswordType, STREAK_ROW_ID
};
use crate::storage::{StorageError, JournalStorage, CredentialStore, migrations};

const ENTRY_COLUMNS: &str = "id, entry_date, title, content, primary_mood, secondary_mood_1, \
     secondary_mood_2, category, tags_json, created_at, updated_at, word_count, is_locked, \
     lock_password_hash, password_type, locked_at";

const TAG_COLUMNS: &str = "id, name, category, usage_count";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based storage implementation
///
/// A single connection is shared behind a mutex and every statement runs on
/// tokio's blocking pool, so callers never block the async runtime.
/// Cloning shares the same connection.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring its schema up to date
    ///
    /// Must be awaited before the storage is handed to any service; a failed
    /// open or migration is returned rather than retried later.
    pub async fn open(db_path: PathBuf) -> Result<Self, StorageError> {
        tokio::task::spawn_blocking(move || Self::open_blocking(&db_path))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }

    /// Open a private in-memory database (used by tests and dry runs)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn open_blocking(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| StorageError::Connection(format!("Failed to set busy timeout: {}", e)))?;

        // Initialize/migrate the database schema
        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking thread pool
    async fn run<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StorageError::Connection("connection mutex poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }

    /// Convert a full entry row into a JournalEntry
    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
        let tags_json: String = row.get(8)?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)
            .map_err(|_| invalid_column(8, "Invalid tag list"))?;

        let password_type = match row.get::<_, Option<String>>(14)? {
            Some(name) => Some(
                name.parse::<PasswordType>()
                    .map_err(|_| invalid_column(14, "Invalid password type"))?,
            ),
            None => None,
        };

        let locked_at = match row.get::<_, Option<String>>(15)? {
            Some(text) => Some(parse_timestamp(15, &text)?),
            None => None,
        };

        Ok(JournalEntry {
            id: Some(EntryId(row.get(0)?)),
            entry_date: parse_date(1, &row.get::<_, String>(1)?)?,
            title: row.get(2)?,
            content: row.get(3)?,
            primary_mood: row.get(4)?,
            secondary_mood_1: row.get(5)?,
            secondary_mood_2: row.get(6)?,
            category: row.get(7)?,
            tags,
            created_at: parse_timestamp(9, &row.get::<_, String>(9)?)?,
            updated_at: parse_timestamp(10, &row.get::<_, String>(10)?)?,
            word_count: row.get(11)?,
            is_locked: row.get(12)?,
            lock_password_hash: row.get(13)?,
            password_type,
            locked_at,
        })
    }

    fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
        Ok(Tag {
            id: Some(TagId(row.get(0)?)),
            name: row.get(1)?,
            category: row.get(2)?,
            usage_count: row.get(3)?,
        })
    }
}

fn invalid_column(index: usize, what: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(index, what.to_string(), rusqlite::types::Type::Text)
}

fn parse_date(index: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid_column(index, "Invalid date"))
}

fn parse_timestamp(index: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid_column(index, "Invalid datetime"))
}

#[async_trait]
impl JournalStorage for SqliteStorage {
    /// Insert a new entry row
    async fn insert_entry(&self, entry: &JournalEntry) -> Result<EntryId, StorageError> {
        let entry = entry.clone();
        let tags_json = serde_json::to_string(&entry.tags)?;

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO journal_entries (
                    entry_date, title, content, primary_mood, secondary_mood_1, secondary_mood_2,
                    category, tags_json, created_at, updated_at, word_count, is_locked,
                    lock_password_hash, password_type, locked_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    entry.entry_date.format(DATE_FORMAT).to_string(),
                    entry.title,
                    entry.content,
                    entry.primary_mood,
                    entry.secondary_mood_1,
                    entry.secondary_mood_2,
                    entry.category,
                    tags_json,
                    entry.created_at.to_rfc3339(),
                    entry.updated_at.to_rfc3339(),
                    entry.word_count,
                    entry.is_locked,
                    entry.lock_password_hash,
                    entry.password_type.map(|t| t.as_str()),
                    entry.locked_at.map(|t| t.to_rfc3339()),
                ],
            )?;

            let entry_id = EntryId(conn.last_insert_rowid());
            tracing::debug!("Created journal entry {} for {}", entry_id, entry.entry_date);
            Ok(entry_id)
        })
        .await
    }

    /// Overwrite every column of an existing entry
    async fn update_entry(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        let entry_id = entry.id.ok_or_else(|| StorageError::EntryNotFound {
            entry_id: "unsaved entry".to_string(),
        })?;
        let entry = entry.clone();
        let tags_json = serde_json::to_string(&entry.tags)?;

        self.run(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE journal_entries SET
                    entry_date = ?2,
                    title = ?3,
                    content = ?4,
                    primary_mood = ?5,
                    secondary_mood_1 = ?6,
                    secondary_mood_2 = ?7,
                    category = ?8,
                    tags_json = ?9,
                    created_at = ?10,
                    updated_at = ?11,
                    word_count = ?12,
                    is_locked = ?13,
                    lock_password_hash = ?14,
                    password_type = ?15,
                    locked_at = ?16
                 WHERE id = ?1",
                params![
                    entry_id.0,
                    entry.entry_date.format(DATE_FORMAT).to_string(),
                    entry.title,
                    entry.content,
                    entry.primary_mood,
                    entry.secondary_mood_1,
                    entry.secondary_mood_2,
                    entry.category,
                    tags_json,
                    entry.created_at.to_rfc3339(),
                    entry.updated_at.to_rfc3339(),
                    entry.word_count,
                    entry.is_locked,
                    entry.lock_password_hash,
                    entry.password_type.map(|t| t.as_str()),
                    entry.locked_at.map(|t| t.to_rfc3339()),
                ],
            )?;

            if rows_affected == 0 {
                return Err(StorageError::EntryNotFound {
                    entry_id: entry_id.to_string(),
                });
            }

            tracing::debug!("Updated journal entry {} for {}", entry_id, entry.entry_date);
            Ok(())
        })
        .await
    }

    async fn delete_entry(&self, entry_id: EntryId) -> Result<bool, StorageError> {
        self.run(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM journal_entries WHERE id = ?1",
                params![entry_id.0],
            )?;

            tracing::debug!("Deleted journal entry {} ({} rows)", entry_id, rows_affected);
            Ok(rows_affected > 0)
        })
        .await
    }

    /// List every entry, most recent date first
    async fn list_entries(&self) -> Result<Vec<JournalEntry>, StorageError> {
        self.run(|conn| {
            let sql = format!(
                "SELECT {} FROM journal_entries ORDER BY entry_date DESC",
                ENTRY_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let entry_iter = stmt.query_map([], Self::entry_from_row)?;

            let mut entries = Vec::new();
            for entry in entry_iter {
                entries.push(entry?);
            }

            Ok(entries)
        })
        .await
    }

    async fn get_entry(&self, entry_id: EntryId) -> Result<Option<JournalEntry>, StorageError> {
        self.run(move |conn| {
            let sql = format!("SELECT {} FROM journal_entries WHERE id = ?1", ENTRY_COLUMNS);
            let entry = conn
                .query_row(&sql, params![entry_id.0], Self::entry_from_row)
                .optional()?;
            Ok(entry)
        })
        .await
    }

    async fn find_entry_by_date(&self, date: NaiveDate) -> Result<Option<JournalEntry>, StorageError> {
        self.run(move |conn| {
            let sql = format!("SELECT {} FROM journal_entries WHERE entry_date = ?1", ENTRY_COLUMNS);
            let entry = conn
                .query_row(&sql, params![date.format(DATE_FORMAT).to_string()], Self::entry_from_row)
                .optional()?;
            Ok(entry)
        })
        .await
    }

    async fn insert_tag(&self, tag: &Tag) -> Result<TagId, StorageError> {
        let tag = tag.clone();

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO tags (name, category, usage_count) VALUES (?1, ?2, ?3)",
                params![tag.name, tag.category, tag.usage_count],
            )?;

            let tag_id = TagId(conn.last_insert_rowid());
            tracing::debug!("Created tag '{}' ({})", tag.name, tag_id);
            Ok(tag_id)
        })
        .await
    }

    async fn update_tag(&self, tag: &Tag) -> Result<(), StorageError> {
        let tag_id = tag.id.ok_or_else(|| StorageError::TagNotFound {
            tag_id: "unsaved tag".to_string(),
        })?;
        let tag = tag.clone();

        self.run(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE tags SET name = ?2, category = ?3, usage_count = ?4 WHERE id = ?1",
                params![tag_id.0, tag.name, tag.category, tag.usage_count],
            )?;

            if rows_affected == 0 {
                return Err(StorageError::TagNotFound {
                    tag_id: tag_id.to_string(),
                });
            }

            tracing::debug!("Updated tag '{}' (used {} times)", tag.name, tag.usage_count);
            Ok(())
        })
        .await
    }

    async fn delete_tag(&self, tag_id: TagId) -> Result<bool, StorageError> {
        self.run(move |conn| {
            let rows_affected = conn.execute("DELETE FROM tags WHERE id = ?1", params![tag_id.0])?;
            Ok(rows_affected > 0)
        })
        .await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, StorageError> {
        self.run(|conn| {
            let sql = format!(
                "SELECT {} FROM tags ORDER BY usage_count DESC, name ASC",
                TAG_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let tag_iter = stmt.query_map([], Self::tag_from_row)?;

            let mut tags = Vec::new();
            for tag in tag_iter {
                tags.push(tag?);
            }

            Ok(tags)
        })
        .await
    }

    async fn get_tag(&self, tag_id: TagId) -> Result<Option<Tag>, StorageError> {
        self.run(move |conn| {
            let sql = format!("SELECT {} FROM tags WHERE id = ?1", TAG_COLUMNS);
            Ok(conn.query_row(&sql, params![tag_id.0], Self::tag_from_row).optional()?)
        })
        .await
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, StorageError> {
        let name = name.to_string();

        self.run(move |conn| {
            let sql = format!("SELECT {} FROM tags WHERE name = ?1", TAG_COLUMNS);
            Ok(conn.query_row(&sql, params![name], Self::tag_from_row).optional()?)
        })
        .await
    }

    async fn load_streak(&self) -> Result<Option<Streak>, StorageError> {
        self.run(|conn| {
            let streak = conn
                .query_row(
                    "SELECT current_streak, longest_streak, last_entry_date, total_entries
                     FROM streak WHERE id = ?1",
                    params![STREAK_ROW_ID],
                    |row| {
                        let last_entry_date = match row.get::<_, Option<String>>(2)? {
                            Some(text) => Some(parse_date(2, &text)?),
                            None => None,
                        };

                        Ok(Streak {
                            current_streak: row.get(0)?,
                            longest_streak: row.get(1)?,
                            last_entry_date,
                            total_entries: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(streak)
        })
        .await
    }

    async fn store_streak(&self, streak: &Streak) -> Result<(), StorageError> {
        let streak = streak.clone();
        let now = Utc::now().to_rfc3339();

        self.run(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO streak (
                    id, current_streak, longest_streak, last_entry_date, total_entries, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    STREAK_ROW_ID,
                    streak.current_streak,
                    streak.longest_streak,
                    streak.last_entry_date.map(|d| d.format(DATE_FORMAT).to_string()),
                    streak.total_entries,
                    now
                ],
            )?;

            tracing::debug!(
                "Stored streak: current {} longest {}",
                streak.current_streak,
                streak.longest_streak
            );
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CredentialStore for SqliteStorage {
    async fn set_credential(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (key, value) = (key.to_string(), value.to_string());

        self.run(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO credentials (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_credential(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = key.to_string();

        self.run(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM credentials WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
        .await
    }

    async fn remove_credential(&self, key: &str) -> Result<(), StorageError> {
        let key = key.to_string();

        self.run(move |conn| {
            conn.execute("DELETE FROM credentials WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }
}
