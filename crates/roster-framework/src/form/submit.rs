//! # Submit Handling
//!
//! [`FormEngine::submit_handler`] wraps a submit callback with the engine's gating:
//!
//! 1. the submission's default effect is prevented,
//! 2. every rule-bearing field is marked touched so latent errors become visible,
//! 3. the whole form is validated; an invalid form stops here, without calling the
//!    callback and without ever raising `submitting`,
//! 4. otherwise `submitting` is held up by a [`SubmittingGuard`] for exactly as long as the
//!    callback's future runs, success or failure.
//!
//! A callback failure is logged and returned as [`SubmitOutcome::Failed`]; it never escapes
//! as a panic or `Err`. The engine does not reject a second submit while one is in flight;
//! front ends disable their trigger while [`FormEngine::is_submitting`] is true.
//!
//! ## Stale Sessions
//!
//! If the form is reset while the callback is suspended, the guard belongs to a previous
//! session generation. Releasing it then leaves the new session's `submitting` alone, and
//! a successful callback reports [`SubmitOutcome::Stale`] so the caller can skip any
//! follow-up work (like resetting the form a second time).

use super::engine::FormEngine;
use super::event::SubmitEvent;
use super::value::FormModel;
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, error};

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the callback was not called.
    Invalid,
    /// The callback completed successfully.
    Submitted,
    /// The callback completed successfully, but the form was reset meanwhile.
    Stale,
    /// The callback failed with this message (already logged).
    Failed(String),
}

/// Holds a form's `submitting` flag up until dropped.
pub struct SubmittingGuard<V: FormModel> {
    form: FormEngine<V>,
    generation: u64,
}

impl<V: FormModel> SubmittingGuard<V> {
    fn acquire(form: &FormEngine<V>) -> Self {
        let mut state = form.state();
        state.submitting = true;
        Self {
            form: form.clone(),
            generation: state.generation,
        }
    }

    /// True once the form has been reset since this guard was acquired.
    pub fn is_stale(&self) -> bool {
        self.form.state().generation != self.generation
    }
}

impl<V: FormModel> Drop for SubmittingGuard<V> {
    fn drop(&mut self) {
        let mut state = self.form.state();
        if state.generation == self.generation {
            state.submitting = false;
        }
    }
}

/// A submit callback bound to a form.
pub struct SubmitHandler<V: FormModel, F> {
    form: FormEngine<V>,
    on_submit: F,
}

impl<V: FormModel> FormEngine<V> {
    /// Wraps `on_submit` with validation gating and busy-flag management.
    pub fn submit_handler<F, Fut, E>(&self, on_submit: F) -> SubmitHandler<V, F>
    where
        F: Fn(V) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        SubmitHandler {
            form: self.clone(),
            on_submit,
        }
    }

    fn touch_rule_fields(&self) {
        let fields: Vec<String> = self.rule_fields().cloned().collect();
        self.state().touched.extend(fields);
    }
}

impl<V, F, Fut, E> SubmitHandler<V, F>
where
    V: FormModel,
    F: Fn(V) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    pub async fn handle(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();
        self.form.touch_rule_fields();

        if !self.form.validate_form() {
            debug!(errors = ?self.form.errors(), "Submit blocked by validation");
            return SubmitOutcome::Invalid;
        }

        let values = self.form.typed_values();
        let guard = SubmittingGuard::acquire(&self.form);
        let result = (self.on_submit)(values).await;
        let stale = guard.is_stale();
        drop(guard);

        match result {
            Ok(()) if stale => {
                debug!("Submit completed after the form was reset");
                SubmitOutcome::Stale
            }
            Ok(()) => SubmitOutcome::Submitted,
            Err(e) => {
                error!(error = %e, "Submit handler failed");
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::rules::{required, RuleSet};
    use crate::form::value::{FieldValue, FieldValues};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn one_field_form(initial: &str) -> FormEngine<FieldValues> {
        let mut values = FieldValues::new();
        values.insert("name".into(), initial.into());
        let mut rules = RuleSet::new();
        rules.insert("name".into(), vec![required()]);
        FormEngine::new(values, rules)
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_callback_nor_sets_submitting() {
        let form = one_field_form("");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler = form.submit_handler(move |_values: FieldValues| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<(), String>(()) }
        });

        let mut event = SubmitEvent::new();
        let outcome = handler.handle(&mut event).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(event.is_default_prevented());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!form.is_submitting());
        // Never-blurred fields are touched so their errors show up.
        assert!(form.field_props("name").error.is_some());
    }

    #[tokio::test]
    async fn test_valid_form_passes_values_and_clears_submitting() {
        let form = one_field_form("Ana");
        let handler = form.submit_handler(|values: FieldValues| async move {
            assert_eq!(values.get("name"), Some(&FieldValue::from("Ana")));
            Ok::<(), String>(())
        });

        let outcome = handler.handle(&mut SubmitEvent::new()).await;
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_failing_callback_is_reported_and_submitting_reset() {
        let form = one_field_form("Ana");
        let handler =
            form.submit_handler(|_: FieldValues| async { Err::<(), _>("store unavailable") });

        let outcome = handler.handle(&mut SubmitEvent::new()).await;
        assert_eq!(outcome, SubmitOutcome::Failed("store unavailable".into()));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submitting_is_true_while_callback_is_suspended() {
        let form = one_field_form("Ana");
        let (release, wait) = oneshot::channel::<()>();
        let wait = std::sync::Mutex::new(Some(wait));
        let handler = form.submit_handler(move |_: FieldValues| {
            let wait = wait.lock().unwrap().take();
            async move {
                if let Some(wait) = wait {
                    let _ = wait.await;
                }
                Ok::<(), String>(())
            }
        });

        let mut event = SubmitEvent::new();

        let observer = form.clone();
        let (outcome, ()) = tokio::join!(handler.handle(&mut event), async move {
            tokio::task::yield_now().await;
            assert!(observer.is_submitting());
            // Input keeps flowing while the submit is suspended.
            observer.set_value("name", "Ana Maria");
            release.send(()).unwrap();
        });

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(!form.is_submitting());
        assert_eq!(form.value("name"), FieldValue::from("Ana Maria"));
    }

    #[tokio::test]
    async fn test_reset_during_submit_yields_stale_and_keeps_new_session_clean() {
        let form = one_field_form("Ana");
        let (release, wait) = oneshot::channel::<()>();
        let wait = std::sync::Mutex::new(Some(wait));
        let handler = form.submit_handler(move |_: FieldValues| {
            let wait = wait.lock().unwrap().take();
            async move {
                if let Some(wait) = wait {
                    let _ = wait.await;
                }
                Ok::<(), String>(())
            }
        });

        let mut event = SubmitEvent::new();

        let session = form.clone();
        let (outcome, ()) = tokio::join!(handler.handle(&mut event), async move {
            tokio::task::yield_now().await;
            session.reset_form();
            assert!(!session.is_submitting());
            release.send(()).unwrap();
        });

        assert_eq!(outcome, SubmitOutcome::Stale);
        assert!(!form.is_submitting());
    }
}
