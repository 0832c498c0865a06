//! Form sessions configured for the roster's record types.

pub mod user_form;

pub use user_form::{user_rules, FormMode, UserForm, UserFormValues};
