/// Database files survive reopening
use super::date;
use journal_mcp::*;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_database_persistence() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();

    let entry_id = {
        let app = JournalApp::open(db_path.clone()).await.expect("Failed to open journal");
        let saved = app
            .entries()
            .save(JournalEntry::new(date(2024, 1, 10)).with_title("Kept").with_tags(["Travel"]))
            .await
            .unwrap();
        app.locks().lock(saved.id.unwrap(), "1234", PasswordType::Pin).await.unwrap();
        app.tags().create_or_get("Travel").await.unwrap();
        app.streaks().recompute_as_of(date(2024, 1, 10)).await.unwrap();
        app.pin().set_pin("9999").await.unwrap();
        saved.id.unwrap()
    };

    let app = JournalApp::open(db_path).await.expect("Failed to reopen journal");

    let entry = app.entries().get_by_id(entry_id).await.unwrap();
    assert_eq!(entry.title.as_deref(), Some("Kept"));
    assert_eq!(entry.tags, vec!["Travel".to_string()]);
    assert!(entry.is_locked);
    assert_eq!(entry.password_type, Some(PasswordType::Pin));

    assert_eq!(app.streaks().current().await.unwrap().current_streak, 1);
    assert_eq!(app.tags().get_all().await.unwrap().len(), 1);
    assert!(app.pin().verify_pin("9999").await.unwrap());

    app.locks().unlock(entry_id, "1234").await.unwrap();
}

#[tokio::test]
async fn test_open_creates_missing_directories_via_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = config::resolve_database_path(Some(dir.path().join("nested").join("journal.db"))).unwrap();

    let app = JournalApp::open(path.clone()).await.expect("Failed to open journal");
    assert_eq!(app.entries().count().await.unwrap(), 0);
    assert!(path.exists());
}

#[tokio::test]
async fn test_storage_interface() {
    let storage = std::sync::Arc::new(SqliteStorage::open_in_memory().expect("Failed to create storage"));

    // The app can be wired over any handle implementing both traits
    let app = JournalApp::with_storage(storage.clone());
    app.entries().save(JournalEntry::new(date(2024, 1, 1))).await.unwrap();

    let _: &dyn JournalStorage = storage.as_ref();
    assert_eq!(storage.list_entries().await.unwrap().len(), 1);
}
