//! # Validation Rule Set
//!
//! A rule checks one field's value (optionally against its siblings) and returns an error
//! message on failure. Rules are pure: same input, same answer, no side effects.
//!
//! Format rules (`email`, `phone`, `min_length`, `max_length`) pass on empty input and
//! leave presence to [`required`], so a field can be optional but well-formed-if-given.
//!
//! A field's rules run in order and stop at the first failure; messages are never
//! aggregated.

use super::value::{FieldValue, FieldValues};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::trace;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-+()]+$").expect("phone pattern compiles"));

const PHONE_MIN_DIGITS: usize = 10;

type Check = dyn Fn(&FieldValue, &FieldValues) -> Option<String> + Send + Sync;

/// One validation rule.
#[derive(Clone)]
pub struct Rule {
    name: &'static str,
    check: Arc<Check>,
}

impl Rule {
    pub fn new(
        name: &'static str,
        check: impl Fn(&FieldValue, &FieldValues) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// A rule from an arbitrary closure; use this for cross-field checks.
    pub fn custom(
        check: impl Fn(&FieldValue, &FieldValues) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::new("custom", check)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self, value: &FieldValue, all: &FieldValues) -> Option<String> {
        (self.check)(value, all)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Field name to ordered rule list.
pub type RuleSet = BTreeMap<String, Vec<Rule>>;

/// Runs `rules` in order, returning the first failure.
pub fn first_failure(rules: &[Rule], value: &FieldValue, all: &FieldValues) -> Option<String> {
    rules.iter().find_map(|rule| {
        let failure = rule.check(value, all);
        if failure.is_some() {
            trace!(rule = rule.name(), "Rule failed");
        }
        failure
    })
}

/// Fails on blank text and empty lists. Flags are always present.
pub fn required() -> Rule {
    Rule::new("required", |value, _| {
        let missing = match value {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Flag(_) => false,
        };
        missing.then(|| REQUIRED_MESSAGE.to_string())
    })
}

pub fn email() -> Rule {
    Rule::new("email", |value, _| {
        let text = value.text_or_empty();
        (!text.is_empty() && !is_valid_email(text)).then(|| EMAIL_MESSAGE.to_string())
    })
}

/// Loose phone check: at least ten digits, and nothing but digits, spaces, `-`, `+`, `(`, `)`.
pub fn phone() -> Rule {
    Rule::new("phone", |value, _| {
        let text = value.text_or_empty();
        if text.is_empty() {
            return None;
        }
        let digits = text.chars().filter(char::is_ascii_digit).count();
        (digits < PHONE_MIN_DIGITS || !PHONE_CHARSET.is_match(text))
            .then(|| PHONE_MESSAGE.to_string())
    })
}

pub fn min_length(min: usize) -> Rule {
    Rule::new("min_length", move |value, _| {
        let len = length_of(value);
        (len > 0 && len < min).then(|| format!("Must be at least {min} characters"))
    })
}

pub fn max_length(max: usize) -> Rule {
    Rule::new("max_length", move |value, _| {
        (length_of(value) > max).then(|| format!("Must be at most {max} characters"))
    })
}

/// `local@domain.tld`, with no whitespace or extra `@` in any part.
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

fn length_of(value: &FieldValue) -> usize {
    match value {
        FieldValue::Text(s) => s.chars().count(),
        FieldValue::List(items) => items.len(),
        FieldValue::Flag(_) => 0,
    }
}
