//! # Form Engine
//!
//! A reusable state container for one form session: field values, per-field errors, the
//! set of touched fields, and whether a submit is in flight.
//!
//! ## Validation Timing
//!
//! - **Typing** ([`FormEngine::set_value`]) never validates. It clears the field's error
//!   optimistically, so a field may look clean before it has been re-checked.
//! - **Leaving a field** ([`FormEngine::handle_blur`]) marks it touched and validates it.
//! - **Submitting** validates every rule-bearing field at once and replaces the whole error
//!   map (see [`super::submit`]).
//!
//! ## Error Visibility
//!
//! Errors are recorded regardless of `touched`, but [`FormEngine::field_props`] only
//! surfaces a field's error once the field has been touched. Hiding an error never clears it.
//!
//! ## Sharing
//!
//! `FormEngine` is a handle: clones share the same state. Change/blur callbacks returned by
//! `field_props` and in-flight submits hold such clones. The state lock is never held
//! across an `.await`.

use super::event::{BlurEvent, InputEvent};
use super::rules::{first_failure, RuleSet};
use super::value::{FieldValue, FieldValues, FormModel};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Field name to error message.
pub type FieldErrors = BTreeMap<String, String>;

/// A shared event callback, as bundled in [`FieldProps`].
pub type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

#[derive(Debug, Default)]
pub(crate) struct FormState {
    pub(crate) values: FieldValues,
    pub(crate) errors: FieldErrors,
    pub(crate) touched: BTreeSet<String>,
    pub(crate) submitting: bool,
    /// Bumped on every reset; lets an in-flight submit notice it outlived its session.
    pub(crate) generation: u64,
}

struct Shared {
    initial: FieldValues,
    rules: RuleSet,
    state: Mutex<FormState>,
}

/// Form state and validation for one form session, typed by its model `V`.
pub struct FormEngine<V: FormModel> {
    shared: Arc<Shared>,
    _model: PhantomData<fn() -> V>,
}

impl<V: FormModel> Clone for FormEngine<V> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            _model: PhantomData,
        }
    }
}

impl<V: FormModel> fmt::Debug for FormEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("rules", &self.shared.rules)
            .field("state", &*self.state())
            .finish()
    }
}

/// Everything a field control needs to render and report back.
pub struct FieldProps {
    pub name: String,
    pub value: FieldValue,
    /// Present only when the field is touched and has a recorded error.
    pub error: Option<String>,
    pub on_change: Callback<InputEvent>,
    pub on_blur: Callback<BlurEvent>,
}

impl fmt::Debug for FieldProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldProps")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<V: FormModel> FormEngine<V> {
    /// Starts a form session seeded with `initial`, validating fields per `rules`.
    pub fn new(initial: V, rules: RuleSet) -> Self {
        let initial = initial.into_values();
        let state = FormState {
            values: initial.clone(),
            ..FormState::default()
        };
        Self {
            shared: Arc::new(Shared {
                initial,
                rules,
                state: Mutex::new(state),
            }),
            _model: PhantomData,
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, FormState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Overwrites a field's value and clears its error without re-validating.
    pub fn set_value(&self, field: &str, value: impl Into<FieldValue>) {
        let mut state = self.state();
        state.values.insert(field.to_string(), value.into());
        state.errors.remove(field);
    }

    pub fn handle_change(&self, event: &InputEvent) {
        self.set_value(&event.name, event.field_value());
    }

    /// Marks the field touched and validates it if it has rules.
    pub fn handle_blur(&self, event: &BlurEvent) {
        self.state().touched.insert(event.name.clone());
        if self.shared.rules.contains_key(&event.name) {
            let value = self.value(&event.name);
            let error = self.validate_field(&event.name, &value);
            debug!(field = %event.name, ?error, "Blur validation");
        }
    }

    /// Runs the field's rules against `value` and the current sibling values, recording
    /// the first failure (or clearing the field's error when all pass).
    pub fn validate_field(&self, field: &str, value: &FieldValue) -> Option<String> {
        let mut state = self.state();
        let error = self
            .shared
            .rules
            .get(field)
            .and_then(|rules| first_failure(rules, value, &state.values));
        match &error {
            Some(message) => {
                state.errors.insert(field.to_string(), message.clone());
            }
            None => {
                state.errors.remove(field);
            }
        }
        error
    }

    /// Validates every rule-bearing field against one snapshot of the values and replaces
    /// the error map wholesale. Returns `true` when nothing failed.
    pub fn validate_form(&self) -> bool {
        let mut state = self.state();
        let errors: FieldErrors = self
            .shared
            .rules
            .iter()
            .filter_map(|(field, rules)| {
                let value = state.values.get(field).cloned().unwrap_or_default();
                first_failure(rules, &value, &state.values).map(|message| (field.clone(), message))
            })
            .collect();
        let valid = errors.is_empty();
        state.errors = errors;
        valid
    }

    /// Restores the construction values, clears errors/touched/submitting and starts a new
    /// session generation.
    pub fn reset_form(&self) {
        let mut state = self.state();
        state.values = self.shared.initial.clone();
        state.errors.clear();
        state.touched.clear();
        state.submitting = false;
        state.generation += 1;
    }

    pub fn field_props(&self, field: &str) -> FieldProps {
        let state = self.state();
        let error = if state.touched.contains(field) {
            state.errors.get(field).cloned()
        } else {
            None
        };
        let value = state.values.get(field).cloned().unwrap_or_default();
        drop(state);

        let on_change = {
            let form = self.clone();
            Arc::new(move |event: &InputEvent| form.handle_change(event))
        };
        let on_blur = {
            let form = self.clone();
            Arc::new(move |event: &BlurEvent| form.handle_blur(event))
        };

        FieldProps {
            name: field.to_string(),
            value,
            error,
            on_change,
            on_blur,
        }
    }

    // --- Queries ---

    /// Current value of `field`, empty text if it was never set.
    pub fn value(&self, field: &str) -> FieldValue {
        self.state().values.get(field).cloned().unwrap_or_default()
    }

    pub fn values(&self) -> FieldValues {
        self.state().values.clone()
    }

    pub fn typed_values(&self) -> V {
        V::from_values(&self.state().values)
    }

    pub fn initial_values(&self) -> &FieldValues {
        &self.shared.initial
    }

    pub fn errors(&self) -> FieldErrors {
        self.state().errors.clone()
    }

    /// The recorded error for `field`, regardless of whether it is touched.
    pub fn error(&self, field: &str) -> Option<String> {
        self.state().errors.get(field).cloned()
    }

    pub fn touched(&self) -> BTreeSet<String> {
        self.state().touched.clone()
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.state().touched.contains(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub fn has_errors(&self) -> bool {
        self.state().errors.values().any(|message| !message.is_empty())
    }

    pub fn is_valid(&self) -> bool {
        let state = self.state();
        self.shared
            .rules
            .keys()
            .all(|field| !state.errors.contains_key(field))
    }

    pub(crate) fn rule_fields(&self) -> impl Iterator<Item = &String> {
        self.shared.rules.keys()
    }
}
