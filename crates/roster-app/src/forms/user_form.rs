//! # User Form
//!
//! A [`FormEngine`] configured for users. Create and edit are separate sessions: a create
//! form starts empty and resets after each successful submit; an edit form is seeded from
//! an existing record and keeps its values.

use crate::clients::UserClient;
use crate::model::{UserData, UserId, UserRecord, UserType};
use crate::user_store::UserError;
use roster_framework::form::{
    rules, FieldValue, FieldValues, FormEngine, FormModel, Rule, RuleSet, SubmitEvent,
    SubmitOutcome,
};
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};
use tracing::info;

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const USER_TYPES: &str = "userTypes";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Typed snapshot of a user form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_types: BTreeSet<UserType>,
    pub password: String,
    pub confirm_password: String,
}

impl UserFormValues {
    /// The store payload. A blank password means "no password".
    pub fn into_user_data(self) -> UserData {
        UserData {
            name: self.name,
            email: self.email,
            phone: self.phone,
            user_types: self.user_types,
            password: Some(self.password).filter(|p| !p.is_empty()),
        }
    }
}

impl From<&UserRecord> for UserFormValues {
    fn from(record: &UserRecord) -> Self {
        let password = record.password.clone().unwrap_or_default();
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            user_types: record.user_types.clone(),
            confirm_password: password.clone(),
            password,
        }
    }
}

impl FormModel for UserFormValues {
    fn into_values(self) -> FieldValues {
        let types: Vec<String> = self.user_types.iter().map(|t| t.to_string()).collect();
        FieldValues::from([
            (NAME.to_string(), FieldValue::from(self.name)),
            (EMAIL.to_string(), FieldValue::from(self.email)),
            (PHONE.to_string(), FieldValue::from(self.phone)),
            (USER_TYPES.to_string(), FieldValue::from(types)),
            (PASSWORD.to_string(), FieldValue::from(self.password)),
            (
                CONFIRM_PASSWORD.to_string(),
                FieldValue::from(self.confirm_password),
            ),
        ])
    }

    fn from_values(values: &FieldValues) -> Self {
        let text = |field: &str| {
            values
                .get(field)
                .map(|v| v.text_or_empty().to_string())
                .unwrap_or_default()
        };
        let user_types: BTreeSet<UserType> = values
            .get(USER_TYPES)
            .map(|v| v.list_or_empty())
            .unwrap_or_default()
            .iter()
            .filter_map(|label| label.parse().ok())
            .collect();
        Self {
            name: text(NAME),
            email: text(EMAIL),
            phone: text(PHONE),
            user_types,
            password: text(PASSWORD),
            confirm_password: text(CONFIRM_PASSWORD),
        }
    }
}

/// Field rules for the user form.
pub fn user_rules() -> RuleSet {
    RuleSet::from([
        (NAME.to_string(), vec![rules::required()]),
        (EMAIL.to_string(), vec![rules::required(), rules::email()]),
        (PHONE.to_string(), vec![rules::required(), rules::phone()]),
        (USER_TYPES.to_string(), vec![rules::required()]),
        (CONFIRM_PASSWORD.to_string(), vec![passwords_match()]),
    ])
}

fn passwords_match() -> Rule {
    Rule::custom(|value, all| {
        let password = all.get(PASSWORD).map(FieldValue::text_or_empty).unwrap_or("");
        (value.text_or_empty() != password).then(|| PASSWORD_MISMATCH.to_string())
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(UserId),
}

/// One user form session bound to the store.
pub struct UserForm {
    engine: FormEngine<UserFormValues>,
    mode: FormMode,
    client: UserClient,
    saved: Mutex<Option<UserRecord>>,
}

impl UserForm {
    /// A blank form that creates a new user on submit.
    pub fn create(client: UserClient) -> Self {
        Self::with_mode(client, UserFormValues::default(), FormMode::Create)
    }

    /// A form seeded from `record` that replaces it on submit.
    pub fn edit(client: UserClient, record: &UserRecord) -> Self {
        Self::with_mode(
            client,
            UserFormValues::from(record),
            FormMode::Edit(record.id.clone()),
        )
    }

    fn with_mode(client: UserClient, initial: UserFormValues, mode: FormMode) -> Self {
        Self {
            engine: FormEngine::new(initial, user_rules()),
            mode,
            client,
            saved: Mutex::new(None),
        }
    }

    pub fn engine(&self) -> &FormEngine<UserFormValues> {
        &self.engine
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Adds `user_type` to the selection, or removes it if already selected.
    pub fn toggle_user_type(&self, user_type: UserType) {
        let mut selected = self.engine.typed_values().user_types;
        if !selected.remove(&user_type) {
            selected.insert(user_type);
        }
        let labels: Vec<String> = selected.iter().map(|t| t.to_string()).collect();
        self.engine.set_value(USER_TYPES, labels);
    }

    /// The record stored by the most recent successful submit.
    pub fn saved(&self) -> Option<UserRecord> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validates, then creates or replaces the user through the store. A create form is
    /// reset after a successful submit unless it was already reset meanwhile.
    pub async fn submit(&self) -> SubmitOutcome {
        let handler = self.engine.submit_handler(|values: UserFormValues| async move {
            let data = values.into_user_data();
            let record = match &self.mode {
                FormMode::Create => self.client.create_user(data).await?,
                FormMode::Edit(id) => self.client.update_user(id.clone(), data).await?,
            };
            info!(user_id = %record.id, "User saved");
            *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(record);
            Ok::<(), UserError>(())
        });

        let outcome = handler.handle(&mut SubmitEvent::new()).await;
        if outcome == SubmitOutcome::Submitted && self.mode == FormMode::Create {
            self.engine.reset_form();
        }
        outcome
    }
}
