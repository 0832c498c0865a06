//! [`StoreEntity`] implementation for [`UserRecord`].
//!
//! Both entry points run [`validate_user`] first, so nothing invalid ever reaches the
//! collection regardless of which front end produced the payload.

use super::error::UserError;
use super::validation::validate_user;
use crate::model::{UserData, UserRecord, UserType};
use chrono::{DateTime, TimeZone, Utc};
use roster_framework::StoreEntity;
use std::collections::BTreeSet;

impl StoreEntity for UserRecord {
    type Id = String;
    type Draft = UserData;
    type Error = UserError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new user stamped with the current time.
    fn from_draft(id: String, data: UserData) -> Result<Self, UserError> {
        let report = validate_user(&data);
        if !report.is_valid {
            return Err(UserError::Validation(report.errors));
        }
        Ok(Self {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            user_types: data.user_types,
            password: data.password,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Builds the full replacement for `id`. Only `created_at` survives from `previous`;
    /// every other field comes from `data`.
    fn replacement(
        id: String,
        data: UserData,
        previous: Option<&Self>,
    ) -> Result<Self, UserError> {
        let mut record = Self::from_draft(id, data)?;
        if let Some(previous) = previous {
            record.created_at = previous.created_at;
        }
        record.updated_at = Some(Utc::now());
        Ok(record)
    }

    fn seed() -> Vec<Self> {
        vec![
            seed_user(
                "1",
                "João Silva",
                "joao.silva@example.com",
                "+351912345678",
                [UserType::Architect, UserType::ProjectManager],
                Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0),
            ),
            seed_user(
                "2",
                "Maria Santos",
                "maria.santos@example.com",
                "+351923456789",
                [UserType::Engineer],
                Utc.with_ymd_and_hms(2024, 2, 20, 14, 30, 0),
            ),
        ]
    }
}

fn seed_user(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    user_types: impl IntoIterator<Item = UserType>,
    created_at: chrono::LocalResult<DateTime<Utc>>,
) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        user_types: user_types.into_iter().collect::<BTreeSet<_>>(),
        password: None,
        created_at: created_at.single().unwrap_or_default(),
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> UserData {
        UserData::new("Ana", "ana@x.com", "+351911222333", [UserType::Architect])
    }

    #[test]
    fn test_from_draft_rejects_invalid_payloads() {
        let err = UserRecord::from_draft("x".into(), UserData::default()).unwrap_err();
        assert_eq!(err.field_errors().map(|e| e.len()), Some(4));
    }

    #[test]
    fn test_replacement_keeps_created_at_and_stamps_updated_at() {
        let seeded = &UserRecord::seed()[0];
        let replaced =
            UserRecord::replacement("1".into(), data(), Some(seeded)).unwrap();

        assert_eq!(replaced.id, "1");
        assert_eq!(replaced.created_at, seeded.created_at);
        assert!(replaced.updated_at.is_some());
        assert_eq!(replaced.name, "Ana");
    }

    #[test]
    fn test_seed_records_pass_their_own_validation() {
        for record in UserRecord::seed() {
            assert!(validate_user(&UserData::from(&record)).is_valid, "{}", record.id);
        }
    }
}
