/// Search, streaks, analytics and tags over a stored journal
use super::{app, date};
use journal_mcp::*;

async fn seed(app: &JournalApp) {
    let entries = vec![
        JournalEntry::new(date(2024, 1, 2))
            .with_title("Gym day")
            .with_content("Ran five kilometers")
            .with_mood("Happy")
            .with_category("Health")
            .with_tags(["Fitness", "Exercise"]),
        JournalEntry::new(date(2024, 1, 4))
            .with_title("Deadline")
            .with_content("Too much work, felt stressed all day")
            .with_mood("Stressed")
            .with_secondary_moods(["Anxious"])
            .with_category("Work")
            .with_tags(["Work"]),
        JournalEntry::new(date(2024, 1, 7))
            .with_content("Quiet evening with a book")
            .with_mood("Happy")
            .with_secondary_moods(["Calm"])
            .with_category("Health")
            .with_tags(["Reading", "Fitness"]),
    ];

    for entry in entries {
        app.entries().save(entry).await.unwrap();
    }
}

#[tokio::test]
async fn test_search_composes_filters() {
    let app = app();
    seed(&app).await;

    let query = SearchQuery::new().text("WORK");
    let results = app.search().search(&query).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry_date, date(2024, 1, 4));

    let query = SearchQuery::new().mood("Calm");
    let results = app.search().search(&query).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry_date, date(2024, 1, 7));

    let query = SearchQuery::new()
        .between(Some(date(2024, 1, 2)), Some(date(2024, 1, 4)))
        .mood("Happy");
    let results = app.search().search(&query).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry_date, date(2024, 1, 2));

    // Title-less entries simply do not match on title
    let results = app.search().search(&SearchQuery::new().text("book")).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_filter_variants_are_newest_first() {
    let app = app();
    seed(&app).await;

    let happy = app.search().filter_by_mood("Happy").await.unwrap();
    assert_eq!(
        happy.iter().map(|e| e.entry_date).collect::<Vec<_>>(),
        vec![date(2024, 1, 7), date(2024, 1, 2)]
    );

    let range = app
        .search()
        .filter_by_date_range(date(2024, 1, 4), date(2024, 1, 7))
        .await
        .unwrap();
    assert_eq!(range.len(), 2);

    let health = app.search().filter_by_category("Health").await.unwrap();
    assert_eq!(health.len(), 2);
    assert!(app.search().filter_by_category("health").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_streak_counts_run_ending_today() {
    let app = app();
    for day in [10, 9, 7] {
        app.entries().save(JournalEntry::new(date(2024, 1, day))).await.unwrap();
    }

    let streak = app.streaks().recompute_as_of(date(2024, 1, 10)).await.unwrap();
    assert_eq!(streak.current_streak, 2);
    assert_eq!(streak.longest_streak, 2);
    assert_eq!(streak.last_entry_date, Some(date(2024, 1, 10)));
    assert_eq!(streak.total_entries, 3);

    // The result is cached until the next recompute
    assert_eq!(app.streaks().current().await.unwrap(), streak);

    app.entries().delete(date(2024, 1, 10)).await.unwrap();
    assert_eq!(app.streaks().current().await.unwrap(), streak);

    let stale_free = app.streaks().recompute_as_of(date(2024, 1, 10)).await.unwrap();
    assert_eq!(stale_free.current_streak, 0);
    assert_eq!(stale_free.total_entries, 2);
}

#[tokio::test]
async fn test_empty_journal_streak_is_zeroed() {
    let app = app();
    assert_eq!(app.streaks().current().await.unwrap(), Streak::empty());

    let streak = app.streaks().recompute().await.unwrap();
    assert_eq!(streak, Streak::empty());
}

#[tokio::test]
async fn test_missed_days() {
    let app = app();
    for day in [2, 4] {
        app.entries().save(JournalEntry::new(date(2024, 1, day))).await.unwrap();
    }

    let missed = app
        .streaks()
        .missed_days(date(2024, 1, 1), date(2024, 1, 5))
        .await
        .unwrap();
    assert_eq!(missed, vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 5)]);
}

#[tokio::test]
async fn test_analytics_over_range() {
    let app = app();
    seed(&app).await;

    let all = DateRange::all();
    let moods = app.analytics().mood_distribution(all).await.unwrap();
    assert_eq!(moods[0], ("Happy".to_string(), 2));

    let categories = app.analytics().mood_category_distribution(all).await.unwrap();
    assert_eq!(
        categories,
        vec![
            (MoodCategory::Positive, 2),
            (MoodCategory::Neutral, 0),
            (MoodCategory::Negative, 1),
        ]
    );

    let tags = app.analytics().most_used_tags(all, 1).await.unwrap();
    assert_eq!(tags, vec![("Fitness".to_string(), 2)]);

    let percentages = app.analytics().category_percentages(all).await.unwrap();
    assert_eq!(percentages[0].0, "Health");

    let january_first_week = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 4)));
    assert_eq!(app.analytics().total_entries(january_first_week).await.unwrap(), 2);
    assert_eq!(
        app.analytics().most_frequent_mood(all).await.unwrap().as_deref(),
        Some("Happy")
    );

    let trend = app.analytics().word_count_trend(all).await.unwrap();
    assert_eq!(trend.len(), 3);
    assert_eq!(trend.keys().next(), Some(&date(2024, 1, 2)));
}

#[tokio::test]
async fn test_analytics_on_empty_range() {
    let app = app();
    seed(&app).await;

    let nothing = DateRange::new(Some(date(2025, 1, 1)), None);
    assert_eq!(app.analytics().average_word_count(nothing).await.unwrap(), 0.0);
    assert!(app.analytics().category_percentages(nothing).await.unwrap().is_empty());
    assert!(app.analytics().category_breakdown(nothing).await.unwrap().is_empty());
    assert!(app
        .analytics()
        .mood_category_distribution(nothing)
        .await
        .unwrap()
        .iter()
        .all(|(_, count)| *count == 0));

    let report = app.analytics().report(nothing, 10).await.unwrap();
    assert_eq!(report.total_entries, 0);
    assert!(report.most_frequent_mood.is_none());
}

#[tokio::test]
async fn test_tag_usage_counts() {
    let app = app();

    let tag = app.tags().create_or_get("  Travel ").await.unwrap();
    assert_eq!(tag.name, "Travel");
    assert_eq!(tag.usage_count, 1);

    app.tags().create_or_get("Travel").await.unwrap();
    let again = app.tags().create_or_get("Travel").await.unwrap();
    assert_eq!(again.id, tag.id);
    assert_eq!(again.usage_count, 3);

    app.tags().create_or_get("Music").await.unwrap();
    let top = app.tags().most_used(1).await.unwrap();
    assert_eq!(top[0].name, "Travel");

    assert!(app.tags().get_by_name("Music").await.unwrap().is_some());
    assert!(app.tags().create_or_get("   ").await.is_err());

    let id = tag.id.unwrap();
    assert_eq!(app.tags().get_by_id(id).await.unwrap().usage_count, 3);
    assert!(app.tags().delete(id).await.unwrap());
    assert!(!app.tags().delete(id).await.unwrap());
    assert!(matches!(app.tags().get_by_id(id).await, Err(JournalError::NotFound { .. })));

    assert_eq!(app.tags().predefined().len(), 31);
}

#[tokio::test]
async fn test_entry_tags_do_not_touch_tag_table() {
    let app = app();
    seed(&app).await;

    assert!(app.tags().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_first_uses_of_a_tag() {
    let app = app();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let tags = app.tags().clone();
        handles.push(tokio::spawn(async move { tags.create_or_get("Yoga").await }));
    }
    for handle in handles {
        handle.await.expect("task panicked").expect("create_or_get failed");
    }

    let all = app.tags().get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].usage_count, 8);
}
