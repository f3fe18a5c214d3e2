use std::time::Duration;

use aventuras::store::{EntryStore, StoreError};
use chrono::NaiveDate;
use uuid::Uuid;

#[tokio::test]
async fn created_entry_round_trips_through_list() {
    let store = EntryStore::in_memory().await.unwrap();

    let created = store
        .create("Visit London", None, None, "couple")
        .await
        .unwrap();
    assert_eq!(created.title, "Visit London");
    assert_eq!(created.note, None);
    assert!(!created.done);
    assert_eq!(created.user_id, "couple");

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "Visit London");
    assert_eq!(listed[0].note, None);
    assert!(!listed[0].done);
}

#[tokio::test]
async fn create_rejects_blank_titles() {
    let store = EntryStore::in_memory().await.unwrap();

    let err = store.create("   ", None, None, "couple").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store.create("", None, None, "couple").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_trims_title_and_normalizes_blank_note() {
    let store = EntryStore::in_memory().await.unwrap();

    let created = store
        .create("  Visit London  ", Some("   "), None, "couple")
        .await
        .unwrap();
    assert_eq!(created.title, "Visit London");
    assert_eq!(created.note, None);

    let created = store
        .create("Moon trip", Some("  someday together  "), None, "couple")
        .await
        .unwrap();
    assert_eq!(created.note.as_deref(), Some("someday together"));
}

#[tokio::test]
async fn create_persists_the_chosen_date() {
    let store = EntryStore::in_memory().await.unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

    let created = store
        .create("Lantern festival", None, Some(date), "couple")
        .await
        .unwrap();

    let fetched = store.get(created.id).await.unwrap();
    assert_eq!(fetched.date, Some(date));
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn list_orders_newest_first() {
    let store = EntryStore::in_memory().await.unwrap();

    for title in ["first", "second", "third"] {
        store.create(title, None, None, "couple").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let titles: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn update_fields_replaces_title_and_note_only() {
    let store = EntryStore::in_memory().await.unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
    let created = store
        .create("Old plan", Some("old note"), Some(date), "maria")
        .await
        .unwrap();

    let updated = store
        .update_fields(created.id, "New plan", Some("new note"))
        .await
        .unwrap();
    assert_eq!(updated.title, "New plan");
    assert_eq!(updated.note.as_deref(), Some("new note"));
    assert_eq!(updated.user_id, "maria");
    assert_eq!(updated.date, Some(date));
    assert_eq!(updated.created_at, created.created_at);
    assert!(!updated.done);

    // Absent note clears the stored one; this is replace, not merge.
    let cleared = store.update_fields(created.id, "New plan", None).await.unwrap();
    assert_eq!(cleared.note, None);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found_and_mutates_nothing() {
    let store = EntryStore::in_memory().await.unwrap();
    let created = store
        .create("Keep me", Some("intact"), None, "couple")
        .await
        .unwrap();

    let err = store
        .update_fields(Uuid::new_v4(), "Ghost", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound));

    let untouched = store.get(created.id).await.unwrap();
    assert_eq!(untouched.title, "Keep me");
    assert_eq!(untouched.note.as_deref(), Some("intact"));
}

#[tokio::test]
async fn update_rejects_blank_title_without_touching_the_row() {
    let store = EntryStore::in_memory().await.unwrap();
    let created = store.create("Keep me", None, None, "couple").await.unwrap();

    let err = store
        .update_fields(created.id, "  ", Some("new note"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let untouched = store.get(created.id).await.unwrap();
    assert_eq!(untouched.title, "Keep me");
    assert_eq!(untouched.note, None);
}

#[tokio::test]
async fn set_done_flips_and_persists() {
    let store = EntryStore::in_memory().await.unwrap();
    let created = store.create("Climb", None, None, "couple").await.unwrap();

    let updated = store.set_done(created.id, true).await.unwrap();
    assert!(updated.done);
    assert!(store.get(created.id).await.unwrap().done);

    let updated = store.set_done(created.id, false).await.unwrap();
    assert!(!updated.done);

    let err = store.set_done(Uuid::new_v4(), true).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn delete_is_permanent_and_immediate() {
    let store = EntryStore::in_memory().await.unwrap();
    let created = store.create("Erase me", None, None, "couple").await.unwrap();

    store.delete(created.id).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
    assert!(matches!(
        store.get(created.id).await.unwrap_err(),
        StoreError::NotFound
    ));

    let err = store.delete(created.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn get_of_unknown_id_is_not_found() {
    let store = EntryStore::in_memory().await.unwrap();
    let err = store.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}
