use chrono::Utc;
use roster_app::config::RosterConfig;
use roster_app::lifecycle::RosterSystem;
use roster_app::model::{UserData, UserRecord, UserType};
use roster_app::user_store::validation::{
    EMAIL_INVALID, NAME_REQUIRED, PHONE_INVALID, USER_TYPES_REQUIRED,
};
use roster_app::user_store::UserError;
use roster_framework::storage::{FileStorage, MemoryStorage};
use roster_framework::{RecordClient, StoreEntity};
use std::sync::Arc;
use tempfile::TempDir;

fn ana() -> UserData {
    UserData::new("Ana", "ana@x.com", "+351911222333", [UserType::Architect])
}

fn start(storage: MemoryStorage) -> RosterSystem {
    RosterSystem::new(&RosterConfig::default(), storage)
}

/// Full end-to-end flow against a real store.
#[tokio::test]
async fn test_create_appends_a_stamped_record() {
    let storage = MemoryStorage::new();
    let system = start(storage.clone());
    let before = Utc::now();

    let created = system
        .user_client
        .create_user(ana())
        .await
        .expect("Failed to create user");

    assert!(!created.id.is_empty());
    assert_ne!(created.id, "1");
    assert_ne!(created.id, "2");
    assert!(created.created_at >= before);
    assert_eq!(created.updated_at, None);

    let users = system.user_client.list().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users.last(), Some(&created));

    let persisted: Vec<UserRecord> =
        serde_json::from_str(&storage.raw("users").expect("slot written")).unwrap();
    assert_eq!(persisted.as_slice(), &*users);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_create_reports_every_field() {
    let system = start(MemoryStorage::new());
    let before = system.user_client.list().await.unwrap();

    let invalid = UserData::new("", "not-an-email", "123", []);
    let err = system.user_client.create_user(invalid).await.unwrap_err();

    let errors = match err {
        UserError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(errors.len(), 4);
    assert_eq!(errors["name"], NAME_REQUIRED);
    assert_eq!(errors["email"], EMAIL_INVALID);
    assert_eq!(errors["phone"], PHONE_INVALID);
    assert_eq!(errors["userTypes"], USER_TYPES_REQUIRED);

    let after = system.user_client.list().await.unwrap();
    assert_eq!(after.len(), before.len());
    assert!(Arc::ptr_eq(&before, &after));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_replaces_the_record_wholesale() {
    let system = start(MemoryStorage::new());
    let client = &system.user_client;
    let original = client.get("1".into()).await.unwrap().expect("seeded");
    let other = client.get("2".into()).await.unwrap().expect("seeded");

    let with_password = client
        .update_user("1".into(), ana().with_password("s3cret"))
        .await
        .unwrap();
    assert_eq!(with_password.password.as_deref(), Some("s3cret"));

    let replaced = client.update_user("1".into(), ana()).await.unwrap();

    assert_eq!(replaced.id, "1");
    assert_eq!(replaced.name, "Ana");
    assert_eq!(replaced.password, None, "absent fields are dropped, not merged");
    assert_eq!(replaced.created_at, original.created_at);
    assert!(replaced.updated_at.is_some());

    let users = client.list().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0], replaced, "position is kept");
    assert_eq!(users[1], other);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_of_unknown_id_changes_nothing() {
    let storage = MemoryStorage::new();
    let system = start(storage.clone());
    let before = system.user_client.list().await.unwrap();

    let built = system
        .user_client
        .update_user("missing".into(), ana())
        .await
        .unwrap();
    assert_eq!(built.id, "missing");

    let after = system.user_client.list().await.unwrap();
    assert_eq!(before, after);
    assert!(storage.raw("users").is_some(), "still persisted");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_update_is_rejected() {
    let system = start(MemoryStorage::new());

    let mut data = ana();
    data.phone = "911 222 33".into();
    let err = system
        .user_client
        .update_user("1".into(), data)
        .await
        .unwrap_err();

    assert_eq!(
        err.field_errors().and_then(|e| e.get("phone")).map(String::as_str),
        Some(PHONE_INVALID)
    );
    let unchanged = system.user_client.get("1".into()).await.unwrap().unwrap();
    assert_eq!(unchanged, UserRecord::seed()[0]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_twice_equals_delete_once() {
    let system = start(MemoryStorage::new());

    system.user_client.delete("1".into()).await.unwrap();
    let once = system.user_client.list().await.unwrap();
    system.user_client.delete("1".into()).await.unwrap();
    let twice = system.user_client.list().await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 1);
    assert_eq!(twice[0].id, "2");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_collection_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = RosterConfig {
        storage_path: dir.path().join("roster-data.json"),
        ..RosterConfig::default()
    };

    let system = RosterSystem::new(&config, FileStorage::new(&config.storage_path));
    system.user_client.create_user(ana()).await.unwrap();
    system.user_client.delete("2".into()).await.unwrap();
    let saved = system.user_client.list().await.unwrap();
    system.shutdown().await.unwrap();

    let system = RosterSystem::new(&config, FileStorage::new(&config.storage_path));
    let restored = system.user_client.list().await.unwrap();
    assert_eq!(saved, restored);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_slot_falls_back_to_seed() {
    let system = start(MemoryStorage::with_slot("users", "[{\"id\": 7"));

    let users = system.user_client.list().await.unwrap();
    assert_eq!(&*users, UserRecord::seed().as_slice());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_custom_slot_key() {
    let storage = MemoryStorage::new();
    let config = RosterConfig {
        slot_key: "people".into(),
        ..RosterConfig::default()
    };
    let system = RosterSystem::new(&config, storage.clone());

    system.user_client.delete("2".into()).await.unwrap();

    assert!(storage.raw("people").is_some());
    assert!(storage.raw("users").is_none());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscribers_observe_new_revisions() {
    let system = start(MemoryStorage::new());
    let mut revisions = system.user_client.subscribe();

    let created = system.user_client.create_user(ana()).await.unwrap();
    revisions.changed().await.unwrap();

    let latest = revisions.borrow_and_update().clone();
    assert_eq!(latest.len(), 3);
    assert_eq!(latest[2], created);

    drop(revisions);
    system.shutdown().await.unwrap();
}
