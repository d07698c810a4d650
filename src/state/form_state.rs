//! Form state: values, errors, touched fields and the in-flight flag

use super::touched::TouchedTracker;
use super::values::ValueStore;
use crate::Values;
use std::collections::BTreeMap;
use tokio::sync::watch;

/// Field name to message. A missing key means no error.
pub type Errors = BTreeMap<String, String>;

/// Reserved error key for form-level submission failures
pub const SUBMIT_ERROR_KEY: &str = "submit";

/// Everything a form screen renders from. Owned by exactly one form.
#[derive(Debug)]
pub struct FormState {
    pub values: ValueStore,
    pub errors: Errors,
    pub touched: TouchedTracker,
    submitting: watch::Sender<bool>,
}

impl FormState {
    pub fn new(initial: Values) -> Self {
        let (submitting, _) = watch::channel(false);
        Self {
            values: ValueStore::new(initial),
            errors: Errors::new(),
            touched: TouchedTracker::default(),
            submitting,
        }
    }

    /// Store a message for `name`; an empty message clears it
    pub fn set_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        let name = name.into();
        let message = message.into();
        if message.is_empty() {
            self.errors.remove(&name);
        } else {
            self.errors.insert(name, message);
        }
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting.send_replace(submitting);
    }

    /// Receiver that observes every change of the in-flight flag
    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    pub(crate) fn submitting_sender(&self) -> &watch::Sender<bool> {
        &self.submitting
    }

    /// Discard edits: values back to the baseline, errors, touched fields
    /// and the in-flight flag cleared
    pub fn reset(&mut self) {
        self.values.reset();
        self.clear_interaction();
    }

    /// Like [`FormState::reset`] but with a new baseline
    pub fn reset_to(&mut self, initial: Values) {
        self.values.reset_to(initial);
        self.clear_interaction();
    }

    fn clear_interaction(&mut self) {
        self.errors.clear();
        self.touched.clear();
        self.set_submitting(false);
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Values::new())
    }
}
