/// Entry store behaviour: one entry per date, timestamps, word counts, paging
use super::{app, date};
use journal_mcp::*;

#[tokio::test]
async fn test_saving_same_date_updates_in_place() {
    let app = app();

    let first = app
        .entries()
        .save(JournalEntry::new(date(2024, 1, 10)).with_title("First").with_content("a b"))
        .await
        .expect("first save");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let second = app
        .entries()
        .save(JournalEntry::new(date(2024, 1, 10)).with_title("Second").with_content("a b c"))
        .await
        .expect("second save");

    assert!(first.id.is_some());
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);

    let all = app.entries().get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title.as_deref(), Some("Second"));
    assert_eq!(all[0].word_count, 3);
    assert_eq!(all[0].created_at, first.created_at);
}

#[tokio::test]
async fn test_word_count_is_recomputed_on_save() {
    let app = app();

    let mut entry = JournalEntry::new(date(2024, 2, 1)).with_content("a b c");
    entry.word_count = 99;
    let saved = app.entries().save(entry).await.unwrap();
    assert_eq!(saved.word_count, 3);

    let empty = app.entries().save(JournalEntry::new(date(2024, 2, 2))).await.unwrap();
    assert_eq!(empty.word_count, 0);
}

#[tokio::test]
async fn test_delete_missing_date_is_a_no_op() {
    let app = app();
    app.entries().save(JournalEntry::new(date(2024, 1, 1))).await.unwrap();

    let removed = app.entries().delete(date(2030, 1, 1)).await.expect("delete should not fail");
    assert!(!removed);
    assert_eq!(app.entries().count().await.unwrap(), 1);

    assert!(app.entries().delete(date(2024, 1, 1)).await.unwrap());
    assert_eq!(app.entries().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_get_by_id_missing_is_not_found() {
    let app = app();
    let err = app.entries().get_by_id(EntryId(404)).await.unwrap_err();
    assert!(matches!(err, JournalError::NotFound { .. }));
}

#[tokio::test]
async fn test_read_after_write_round_trip() {
    let app = app();

    let saved = app
        .entries()
        .save(
            JournalEntry::new(date(2024, 3, 3))
                .with_title("Round trip")
                .with_content("Everything should come back\nexactly")
                .with_mood("Grateful")
                .with_secondary_moods(["Calm", "Curious"])
                .with_category("Personal")
                .with_tags(["Reading", "Nature"]),
        )
        .await
        .unwrap();

    let by_id = app.entries().get_by_id(saved.id.unwrap()).await.unwrap();
    assert_eq!(by_id, saved);

    let all = app.entries().get_all().await.unwrap();
    assert_eq!(all, vec![saved]);
}

#[tokio::test]
async fn test_get_all_is_newest_first() {
    let app = app();
    for day in [5, 1, 9, 3] {
        app.entries().save(JournalEntry::new(date(2024, 4, day))).await.unwrap();
    }

    let dates: Vec<_> = app
        .entries()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.entry_date)
        .collect();
    assert_eq!(dates, vec![date(2024, 4, 9), date(2024, 4, 5), date(2024, 4, 3), date(2024, 4, 1)]);
}

#[tokio::test]
async fn test_second_page_of_fifteen_entries() {
    let app = app();
    for day in 1..=15 {
        app.entries().save(JournalEntry::new(date(2024, 5, day))).await.unwrap();
    }

    let page = app.entries().get_paginated(2, 10).await.unwrap();
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_previous_page());
    assert!(!page.has_next_page());
    // Newest first, so page two holds the oldest days
    assert_eq!(page.items[0].entry_date, date(2024, 5, 5));

    let beyond = app.entries().get_paginated(9, 10).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_items, 15);
}

#[tokio::test]
async fn test_concurrent_saves_for_one_date_leave_one_row() {
    let app = app();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = app.entries().clone();
        handles.push(tokio::spawn(async move {
            store
                .save(JournalEntry::new(date(2024, 6, 1)).with_title(format!("Draft {}", i)))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked").expect("save failed");
    }

    assert_eq!(app.entries().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_with_serializes_read_modify_write() {
    let app = app();
    let saved = app
        .entries()
        .save(JournalEntry::new(date(2024, 6, 2)).with_content("draft"))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    let (edited, locked) = tokio::join!(
        app.entries().update_with(id, |entry| {
            entry.content = Some("final words".to_string());
            Ok(())
        }),
        app.locks().lock(id, "Abcd1234", PasswordType::Strong),
    );
    edited.expect("edit failed");
    locked.expect("lock failed");

    // Neither change overwrote the other
    let stored = app.entries().get_by_id(id).await.unwrap();
    assert!(stored.is_locked);
    assert_eq!(stored.content.as_deref(), Some("final words"));
    assert_eq!(stored.word_count, 2);
}

#[tokio::test]
async fn test_failed_update_with_writes_nothing() {
    let app = app();
    let saved = app
        .entries()
        .save(JournalEntry::new(date(2024, 6, 3)).with_title("Kept"))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    let err = app
        .entries()
        .update_with(id, |entry| {
            entry.title = Some("Changed".to_string());
            Err(JournalError::AccessDenied)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::AccessDenied));

    let stored = app.entries().get_by_id(id).await.unwrap();
    assert_eq!(stored.title.as_deref(), Some("Kept"));
    assert_eq!(stored.updated_at, saved.updated_at);
}

#[tokio::test]
async fn test_oversized_title_is_rejected() {
    let app = app();
    let entry = JournalEntry::new(date(2024, 1, 1)).with_title("x".repeat(201));

    let err = app.entries().save(entry).await.unwrap_err();
    assert!(matches!(err, JournalError::Domain(_)));
    assert_eq!(app.entries().count().await.unwrap(), 0);
}
