//! # Forms
//!
//! Generic form-state and validation, independent of any particular record type.
//!
//! - [`rules`] - the Validation Rule Set (`required`, `email`, `phone`, lengths, custom)
//! - [`FormEngine`] - values, errors, touched fields and the submitting flag for one session
//! - [`SubmitHandler`] - validation-gated submit with a scoped busy flag
//!
//! ```rust
//! use roster_framework::form::{rules, BlurEvent, FieldValues, FormEngine, InputEvent, RuleSet};
//!
//! let mut form_rules = RuleSet::new();
//! form_rules.insert("email".into(), vec![rules::required(), rules::email()]);
//! let form = FormEngine::new(FieldValues::new(), form_rules);
//!
//! form.handle_change(&InputEvent::text("email", "nope"));
//! assert!(form.field_props("email").error.is_none());
//!
//! form.handle_blur(&BlurEvent::new("email"));
//! assert!(form.field_props("email").error.is_some());
//! ```

pub mod engine;
pub mod event;
pub mod rules;
pub mod submit;
pub mod value;

pub use engine::{Callback, FieldErrors, FieldProps, FormEngine};
pub use event::{BlurEvent, InputEvent, InputKind, SubmitEvent};
pub use rules::{Rule, RuleSet};
pub use submit::{SubmitHandler, SubmitOutcome, SubmittingGuard};
pub use value::{FieldValue, FieldValues, FormModel};
