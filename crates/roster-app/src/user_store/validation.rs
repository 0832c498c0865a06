//! Record-level validation: the store's own gate, stricter than the form rules.

use crate::model::UserData;
use regex::Regex;
use roster_framework::form::rules::is_valid_email;
use roster_framework::form::FieldErrors;
use std::sync::LazyLock;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_INVALID: &str = "Phone must be 9 digits, optionally prefixed with +351";
pub const USER_TYPES_REQUIRED: &str = "Select at least one user type";

static PORTUGUESE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+351)?[0-9]{9}$").expect("phone pattern is valid"));

/// Outcome of [`validate_user`]. `errors` is keyed by the payload's JSON field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

/// True for an optional `+351` followed by exactly nine ASCII digits, ignoring spaces.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| *c != ' ').collect();
    PORTUGUESE_PHONE.is_match(&compact)
}

pub fn validate_user(data: &UserData) -> ValidationReport {
    let mut errors = FieldErrors::new();

    if data.name.trim().is_empty() {
        errors.insert("name".into(), NAME_REQUIRED.into());
    }

    if data.email.trim().is_empty() {
        errors.insert("email".into(), EMAIL_REQUIRED.into());
    } else if !is_valid_email(&data.email) {
        errors.insert("email".into(), EMAIL_INVALID.into());
    }

    if data.phone.trim().is_empty() {
        errors.insert("phone".into(), PHONE_REQUIRED.into());
    } else if !is_valid_phone(&data.phone) {
        errors.insert("phone".into(), PHONE_INVALID.into());
    }

    if data.user_types.is_empty() {
        errors.insert("userTypes".into(), USER_TYPES_REQUIRED.into());
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
