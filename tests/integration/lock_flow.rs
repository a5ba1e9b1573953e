/// Per-entry locks and the application PIN
use super::{app, date};
use journal_mcp::*;

async fn saved_entry(app: &JournalApp) -> EntryId {
    app.entries()
        .save(JournalEntry::new(date(2024, 1, 10)).with_title("Private").with_content("secret words"))
        .await
        .unwrap()
        .id
        .unwrap()
}

#[tokio::test]
async fn test_pin_with_letters_fails_and_leaves_entry_unlocked() {
    let app = app();
    let id = saved_entry(&app).await;

    let err = app.locks().lock(id, "12ab", PasswordType::Pin).await.unwrap_err();
    match err {
        JournalError::ValidationFailed { issues } => {
            assert!(issues.iter().any(|i| i.contains("digits")), "{:?}", issues);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }

    assert!(!app.locks().is_locked(id).await.unwrap());
    let entry = app.entries().get_by_id(id).await.unwrap();
    assert!(entry.lock_password_hash.is_none());
}

#[tokio::test]
async fn test_strong_lock_then_wrong_then_right_unlock() {
    let app = app();
    let id = saved_entry(&app).await;

    let locked = app.locks().lock(id, "Abcd1234", PasswordType::Strong).await.unwrap();
    assert!(locked.is_locked);
    assert_eq!(locked.password_type, Some(PasswordType::Strong));
    assert!(locked.locked_at.is_some());
    assert_ne!(locked.lock_password_hash.as_deref(), Some("Abcd1234"));

    let err = app.locks().unlock(id, "wrong-password").await.unwrap_err();
    assert!(matches!(err, JournalError::AccessDenied));
    assert!(app.locks().is_locked(id).await.unwrap());

    let unlocked = app.locks().unlock(id, "Abcd1234").await.unwrap();
    assert!(!unlocked.is_locked);
    assert!(unlocked.lock_password_hash.is_none());
    assert!(unlocked.password_type.is_none());
    assert!(unlocked.locked_at.is_none());

    let stored = app.entries().get_by_id(id).await.unwrap();
    assert_eq!(stored, unlocked);
}

#[tokio::test]
async fn test_strong_rules_are_all_reported() {
    let app = app();
    let id = saved_entry(&app).await;

    let err = app.locks().lock(id, "abc", PasswordType::Strong).await.unwrap_err();
    let JournalError::ValidationFailed { issues } = err else {
        panic!("expected validation failure");
    };
    // too short, no uppercase, no digit
    assert_eq!(issues.len(), 3, "{:?}", issues);
}

#[tokio::test]
async fn test_unlock_failures() {
    let app = app();
    let id = saved_entry(&app).await;

    let err = app.locks().unlock(id, "whatever").await.unwrap_err();
    assert!(matches!(err, JournalError::NotLocked { .. }));

    let err = app.locks().unlock(EntryId(999), "whatever").await.unwrap_err();
    assert!(matches!(err, JournalError::NotFound { .. }));

    let err = app.locks().lock(EntryId(999), "1234", PasswordType::Pin).await.unwrap_err();
    assert!(matches!(err, JournalError::NotFound { .. }));
    assert!(!app.locks().is_locked(EntryId(999)).await.unwrap());
}

#[tokio::test]
async fn test_locked_without_hash_is_reported() {
    let app = app();
    let id = saved_entry(&app).await;

    let mut entry = app.entries().get_by_id(id).await.unwrap();
    entry.is_locked = true;
    app.entries().save(entry).await.unwrap();

    let err = app.locks().unlock(id, "1234").await.unwrap_err();
    assert!(matches!(err, JournalError::MissingLockHash { .. }));
}

#[tokio::test]
async fn test_read_if_unlocked() {
    let app = app();
    let id = saved_entry(&app).await;

    let access = app.locks().read_if_unlocked(id, None).await.unwrap();
    assert!(matches!(access, EntryAccess::Readable(_)));

    app.locks().lock(id, "2468", PasswordType::Pin).await.unwrap();

    let access = app.locks().read_if_unlocked(id, None).await.unwrap();
    assert_eq!(access, EntryAccess::Inaccessible);

    let access = app.locks().read_if_unlocked(id, Some("1357")).await.unwrap();
    assert_eq!(access, EntryAccess::Inaccessible);

    let entry = app
        .locks()
        .read_if_unlocked(id, Some("2468"))
        .await
        .unwrap()
        .into_entry()
        .expect("correct password should open the entry");
    assert_eq!(entry.content.as_deref(), Some("secret words"));
    // Reading never unlocks
    assert!(entry.is_locked);
}

#[tokio::test]
async fn test_pin_gate() {
    let app = app();
    let pin = app.pin();

    assert!(!pin.is_enabled().await.unwrap());
    assert!(pin.verify_pin("anything").await.unwrap());

    assert!(matches!(pin.set_pin("").await, Err(JournalError::ValidationFailed { .. })));

    pin.set_pin("4321").await.unwrap();
    assert!(pin.is_enabled().await.unwrap());
    assert!(pin.verify_pin("4321").await.unwrap());
    assert!(!pin.verify_pin("1234").await.unwrap());

    pin.disable().await.unwrap();
    assert!(!pin.is_enabled().await.unwrap());
    assert!(pin.verify_pin("1234").await.unwrap());
}
