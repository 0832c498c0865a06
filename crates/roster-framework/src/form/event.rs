//! Input signals the front end feeds into a form.

use super::value::FieldValue;

/// What kind of control produced an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Checkbox,
}

/// A generic "input changed" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub name: String,
    pub kind: InputKind,
    pub value: String,
    pub checked: bool,
}

impl InputEvent {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Text,
            value: value.into(),
            checked: false,
        }
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Checkbox,
            value: String::new(),
            checked,
        }
    }

    /// Checkboxes report their checked state; everything else reports its text.
    pub fn field_value(&self) -> FieldValue {
        match self.kind {
            InputKind::Checkbox => FieldValue::Flag(self.checked),
            InputKind::Text => FieldValue::Text(self.value.clone()),
        }
    }
}

/// A field lost focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurEvent {
    pub name: String,
}

impl BlurEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A form submission signal. The submit handler always prevents its default effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
