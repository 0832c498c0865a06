use roster_app::clients::UserClient;
use roster_app::config::RosterConfig;
use roster_app::forms::user_form::{
    CONFIRM_PASSWORD, EMAIL, NAME, PASSWORD, PASSWORD_MISMATCH, PHONE, USER_TYPES,
};
use roster_app::forms::{FormMode, UserForm, UserFormValues};
use roster_app::lifecycle::RosterSystem;
use roster_app::model::{UserData, UserRecord, UserType};
use roster_app::user_store::validation::PHONE_INVALID;
use roster_app::user_store::UserError;
use roster_framework::form::rules::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
use roster_framework::form::{BlurEvent, FieldValue, InputEvent, SubmitOutcome};
use roster_framework::mock::{create_mock_client, expect_create, MockClient};
use roster_framework::storage::MemoryStorage;
use roster_framework::{RecordClient, StoreEntity, StoreError};

fn fill_valid(form: &UserForm) {
    let engine = form.engine();
    engine.handle_change(&InputEvent::text(NAME, "Ana"));
    engine.handle_change(&InputEvent::text(EMAIL, "ana@x.com"));
    engine.handle_change(&InputEvent::text(PHONE, "+351 911 222 333"));
    form.toggle_user_type(UserType::Architect);
}

fn record(id: &str) -> UserRecord {
    let data = UserData::new("Ana", "ana@x.com", "+351 911 222 333", [UserType::Architect]);
    UserRecord::from_draft(id.into(), data).unwrap()
}

#[tokio::test]
async fn test_errors_surface_only_after_blur() {
    let mock = MockClient::<UserRecord>::new();
    let form = UserForm::create(UserClient::new(mock.client()));
    let engine = form.engine();

    let props = engine.field_props(EMAIL);
    (props.on_change)(&InputEvent::text(EMAIL, "nope"));
    assert_eq!(engine.field_props(EMAIL).error, None);

    (props.on_blur)(&BlurEvent::new(EMAIL));
    let props = engine.field_props(EMAIL);
    assert_eq!(props.error.as_deref(), Some(EMAIL_MESSAGE));
    assert_eq!(props.value, FieldValue::from("nope"));

    // Typing clears the error optimistically; the next blur re-checks.
    (props.on_change)(&InputEvent::text(EMAIL, "ana@x.com"));
    assert_eq!(engine.field_props(EMAIL).error, None);
    (props.on_blur)(&BlurEvent::new(EMAIL));
    assert!(engine.is_valid());
}

#[tokio::test]
async fn test_invalid_submit_never_reaches_the_store() {
    let mock = MockClient::<UserRecord>::new();
    let form = UserForm::create(UserClient::new(mock.client()));

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    let errors = form.engine().errors();
    for field in [NAME, EMAIL, PHONE, USER_TYPES] {
        assert_eq!(errors.get(field).map(String::as_str), Some(REQUIRED_MESSAGE));
        assert!(form.engine().is_touched(field));
    }
    assert!(!form.engine().is_submitting());
    assert_eq!(form.saved(), None);
    mock.verify();
}

#[tokio::test]
async fn test_successful_create_resets_the_form() {
    let mut mock = MockClient::<UserRecord>::new();
    mock.expect_create().return_ok(record("u1"));
    let form = UserForm::create(UserClient::new(mock.client()));
    fill_valid(&form);

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(form.saved().map(|u| u.id), Some("u1".to_string()));
    assert_eq!(form.engine().typed_values(), UserFormValues::default());
    assert!(form.engine().touched().is_empty());
    assert!(!form.engine().is_submitting());
    mock.verify();
}

#[tokio::test]
async fn test_failed_submit_keeps_input_and_clears_busy_flag() {
    let mut mock = MockClient::<UserRecord>::new();
    mock.expect_create().return_err(StoreError::ActorClosed);
    let form = UserForm::create(UserClient::new(mock.client()));
    fill_valid(&form);

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(!form.engine().is_submitting());
    assert_eq!(form.engine().typed_values().name, "Ana");
    mock.verify();
}

#[tokio::test]
async fn test_store_validation_failure_is_reported() {
    let mut mock = MockClient::<UserRecord>::new();
    let errors = [(PHONE.to_string(), PHONE_INVALID.to_string())].into();
    mock.expect_create()
        .return_err(StoreError::Entity(Box::new(UserError::Validation(errors))));
    let form = UserForm::create(UserClient::new(mock.client()));
    fill_valid(&form);

    match form.submit().await {
        SubmitOutcome::Failed(message) => assert!(message.contains(PHONE_INVALID), "{message}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_edit_form_is_seeded_and_not_reset() {
    let seeded = UserRecord::seed()[0].clone();
    let mut edited = seeded.clone();
    edited.name = "João P. Silva".into();

    let mut mock = MockClient::<UserRecord>::new();
    mock.expect_update().return_ok(edited.clone());
    let form = UserForm::edit(UserClient::new(mock.client()), &seeded);

    assert_eq!(form.mode(), &FormMode::Edit("1".into()));
    assert_eq!(form.engine().typed_values().email, seeded.email);
    assert_eq!(form.engine().typed_values().user_types, seeded.user_types);

    form.engine()
        .handle_change(&InputEvent::text(NAME, "João P. Silva"));
    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(form.saved(), Some(edited));
    assert_eq!(form.engine().typed_values().name, "João P. Silva");
    mock.verify();
}

#[tokio::test]
async fn test_toggle_user_type() {
    let mock = MockClient::<UserRecord>::new();
    let form = UserForm::create(UserClient::new(mock.client()));

    form.toggle_user_type(UserType::Engineer);
    form.toggle_user_type(UserType::ProjectManager);
    form.toggle_user_type(UserType::Engineer);

    assert_eq!(
        form.engine().value(USER_TYPES),
        FieldValue::List(vec!["Project Manager".to_string()])
    );
}

#[tokio::test]
async fn test_password_confirmation_must_match() {
    let mock = MockClient::<UserRecord>::new();
    let form = UserForm::create(UserClient::new(mock.client()));
    fill_valid(&form);
    form.engine()
        .handle_change(&InputEvent::text(PASSWORD, "s3cret"));
    form.engine()
        .handle_change(&InputEvent::text(CONFIRM_PASSWORD, "s3cert"));

    assert_eq!(form.submit().await, SubmitOutcome::Invalid);
    assert_eq!(
        form.engine().error(CONFIRM_PASSWORD).as_deref(),
        Some(PASSWORD_MISMATCH)
    );
    mock.verify();
}

#[tokio::test]
async fn test_reset_during_submit_is_stale() {
    let (client, mut receiver) = create_mock_client::<UserRecord>(10);
    let form = UserForm::create(UserClient::new(client));
    fill_valid(&form);

    let respond = async {
        let (draft, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert!(form.engine().is_submitting());

        form.engine().reset_form();
        assert!(!form.engine().is_submitting());

        let created = UserRecord::from_draft("u2".into(), draft).unwrap();
        responder.send(Ok(created)).unwrap();
    };
    let (outcome, ()) = tokio::join!(form.submit(), respond);

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert!(!form.engine().is_submitting());
    assert_eq!(form.saved().map(|u| u.id), Some("u2".to_string()));
}

#[tokio::test]
async fn test_form_submits_through_the_real_store() {
    let system = RosterSystem::new(&RosterConfig::default(), MemoryStorage::new());
    let form = UserForm::create(system.user_client.clone());
    fill_valid(&form);
    form.engine()
        .handle_change(&InputEvent::text(PASSWORD, "s3cret"));
    form.engine()
        .handle_change(&InputEvent::text(CONFIRM_PASSWORD, "s3cret"));

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);

    let saved = form.saved().expect("saved record");
    assert_eq!(saved.password.as_deref(), Some("s3cret"));
    let users = system.user_client.list().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[2], saved);

    drop(form);
    system.shutdown().await.unwrap();
}
