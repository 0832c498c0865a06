use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Type alias for User IDs.
pub type UserId = String;

/// Role tags a user can carry. The catalog is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserType {
    Architect,
    Engineer,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    Designer,
    Consultant,
}

impl UserType {
    pub const ALL: [UserType; 5] = [
        UserType::Architect,
        UserType::Engineer,
        UserType::ProjectManager,
        UserType::Designer,
        UserType::Consultant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserType::Architect => "Architect",
            UserType::Engineer => "Engineer",
            UserType::ProjectManager => "Project Manager",
            UserType::Designer => "Designer",
            UserType::Consultant => "Consultant",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown user type: {0}")]
pub struct UnknownUserType(pub String);

impl FromStr for UserType {
    type Err = UnknownUserType;

    /// Accepts the label (`Project Manager`) or a compact spelling (`project-manager`,
    /// `projectmanager`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        UserType::ALL
            .into_iter()
            .find(|t| {
                t.label()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .eq(wanted.chars())
            })
            .ok_or_else(|| UnknownUserType(s.to_string()))
    }
}

/// A registered user, as stored and persisted.
///
/// # Store
/// This struct implements the [`StoreEntity`](roster_framework::StoreEntity) trait,
/// allowing it to be managed by a [`StoreActor`](roster_framework::StoreActor).
/// The JSON field names (`userTypes`, `createdAt`, ...) are the durable slot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_types: BTreeSet<UserType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or replacing a user.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_types: BTreeSet<UserType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserData {
    /// Creates a payload without a password.
    ///
    /// # Arguments
    /// * `name` - User's display name
    /// * `email` - User's email address
    /// * `phone` - User's phone number
    /// * `user_types` - Role tags
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        user_types: impl IntoIterator<Item = UserType>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            user_types: user_types.into_iter().collect(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

// Requests are logged with their payload; keep the password out of the logs.
impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("user_types", &self.user_types)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl From<&UserRecord> for UserData {
    fn from(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            user_types: record.user_types.clone(),
            password: record.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parses_labels_and_compact_spellings() {
        assert_eq!("Architect".parse::<UserType>().unwrap(), UserType::Architect);
        assert_eq!(
            "Project Manager".parse::<UserType>().unwrap(),
            UserType::ProjectManager
        );
        assert_eq!(
            "project-manager".parse::<UserType>().unwrap(),
            UserType::ProjectManager
        );
        assert!("Astronaut".parse::<UserType>().is_err());
    }

    #[test]
    fn test_debug_output_hides_the_password() {
        let data = UserData::new("Ana", "ana@x.com", "+351911222333", []).with_password("s3cret");
        let printed = format!("{data:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_record_json_uses_camel_case_and_omits_absent_optionals() {
        let record = UserRecord {
            id: "1".into(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            phone: "+351911222333".into(),
            user_types: [UserType::ProjectManager].into(),
            password: None,
            created_at: "2024-01-15T10:00:00Z".parse().unwrap(),
            updated_at: None,
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["userTypes"], serde_json::json!(["Project Manager"]));
        assert_eq!(json["createdAt"], "2024-01-15T10:00:00Z");
        assert!(json.get("password").is_none());
        assert!(json.get("updatedAt").is_none());

        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
