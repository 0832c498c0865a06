//! Field values and the typed form model.

use std::collections::BTreeMap;

/// The current value of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs, selects, text areas.
    Text(String),
    /// Checkbox inputs.
    Flag(bool),
    /// Multi-select groups (e.g. a set of role checkboxes).
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text or list content, falling back to `""`/empty for other variants.
    pub fn text_or_empty(&self) -> &str {
        self.as_text().unwrap_or_default()
    }

    pub fn list_or_empty(&self) -> &[String] {
        self.as_list().unwrap_or_default()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Field name to value mapping. Fields that were never populated are simply absent.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// A typed view over a form's values.
///
/// The engine stores values as [`FieldValues`]; a model converts to that map when the form
/// is built and back when the submit callback runs. `from_values` must tolerate missing
/// fields, since initial population may be partial.
pub trait FormModel: Clone + Send + 'static {
    fn into_values(self) -> FieldValues;

    fn from_values(values: &FieldValues) -> Self;
}

impl FormModel for FieldValues {
    fn into_values(self) -> FieldValues {
        self
    }

    fn from_values(values: &FieldValues) -> Self {
        values.clone()
    }
}
