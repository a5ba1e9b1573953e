/// Entries, streak arithmetic, moods and pagination
use chrono::NaiveDate;
use journal_mcp::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_entry_creation() {
    let entry = JournalEntry::new(date(2024, 1, 10))
        .with_title("Test")
        .with_mood("Happy")
        .with_secondary_moods(["Calm", "Curious", "Bored"]);

    assert!(entry.id.is_none());
    assert!(!entry.is_locked);
    assert_eq!(entry.secondary_moods(), vec!["Calm", "Curious"]);
    assert!(entry.has_mood("Curious"));
    assert!(!entry.has_mood("Bored"));
    assert!(entry.validate().is_ok());
}

#[test]
fn test_word_count() {
    assert_eq!(count_words(Some("a b c")), 3);
    assert_eq!(count_words(Some("   ")), 0);
    assert_eq!(count_words(None), 0);
}

#[test]
fn test_streak_with_gap() {
    let dates = [date(2024, 1, 10), date(2024, 1, 9), date(2024, 1, 7)];
    assert_eq!(current_streak(&dates, date(2024, 1, 10)), 2);
    assert_eq!(longest_streak(&dates), 2);

    // Yesterday's run does not count once today has no entry
    assert_eq!(current_streak(&dates, date(2024, 1, 11)), 0);
}

#[test]
fn test_longest_streak_in_the_past() {
    let dates = [
        date(2024, 3, 1),
        date(2024, 2, 3),
        date(2024, 2, 2),
        date(2024, 2, 1),
        date(2024, 1, 31),
    ];
    assert_eq!(longest_streak(&dates), 4);
    assert_eq!(longest_streak(&dates[..1]), 1);
    assert_eq!(longest_streak(&[]), 0);
}

#[test]
fn test_streak_from_entries() {
    let entries: Vec<JournalEntry> = [10, 9, 7]
        .into_iter()
        .map(|d| JournalEntry::new(date(2024, 1, d)))
        .collect();

    let streak = Streak::calculate_from_entries(&entries, date(2024, 1, 10));
    assert_eq!(streak.current_streak, 2);
    assert_eq!(streak.total_entries, 3);
    assert!(streak.motivational_message().contains('2'));

    assert_eq!(Streak::calculate_from_entries(&[], date(2024, 1, 10)), Streak::empty());
}

#[test]
fn test_mood_catalogue() {
    assert_eq!(all_moods().len(), 15);
    assert_eq!(MoodCategory::of("Lonely"), Some(MoodCategory::Negative));
    assert_eq!(MoodCategory::of("lonely"), None);
    assert_eq!(related_moods("Positive"), MoodCategory::Positive.moods().to_vec());
    assert_eq!(related_moods("Calm"), MoodCategory::Neutral.moods().to_vec());
    assert_eq!(related_moods("???").len(), 15);
}

#[test]
fn test_password_type_names() {
    assert_eq!("PIN".parse::<PasswordType>().unwrap(), PasswordType::Pin);
    assert_eq!(PasswordType::Strong.to_string(), "Strong");
    assert!("Fingerprint".parse::<PasswordType>().is_err());
    assert_eq!(serde_json::to_string(&PasswordType::Pin).unwrap(), "\"PIN\"");
}

#[test]
fn test_pagination_metadata() {
    let page = Page::paginate((1..=15).collect::<Vec<u32>>(), 2, 10).unwrap();
    assert_eq!(page.items.len(), 5);
    assert!(page.has_previous_page());
    assert!(!page.has_next_page());
    assert_eq!(page.total_pages, 2);

    assert!(Page::paginate(vec![1], 1, 0).is_err());
}

#[test]
fn test_entry_date_parsing() {
    assert_eq!(parse_entry_date("2024-01-10").unwrap(), date(2024, 1, 10));
    assert_eq!(parse_entry_date("2024-01-10 23:59:59").unwrap(), date(2024, 1, 10));
    assert!(parse_entry_date("10/01/2024").is_err());
}

#[test]
fn test_user_session() {
    let mut session = UserSession::new();
    assert!(!session.is_logged_in());

    session.login("Alex");
    assert_eq!(session.current_user().map(|u| u.name.as_str()), Some("Alex"));

    session.logout();
    assert!(session.current_user().is_none());
}

#[test]
fn test_storage_creation() {
    let storage = SqliteStorage::open_in_memory().expect("Failed to create storage");

    let streak = tokio_test::block_on(storage.load_streak()).unwrap();
    assert!(streak.is_none());
}
