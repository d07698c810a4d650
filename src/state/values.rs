//! Value store
//!
//! Current field values plus the baseline they were loaded from, so edits
//! can be discarded and dirtiness reported.

use crate::Values;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    current: Values,
    initial: Values,
}

impl ValueStore {
    pub fn new(initial: Values) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    pub fn all(&self) -> &Values {
        &self.current
    }

    pub fn initial(&self) -> &Values {
        &self.initial
    }

    /// Value for `name`; unknown keys read as `null`
    pub fn get(&self, name: &str) -> &Value {
        self.current.get(name).unwrap_or(&Value::Null)
    }

    /// Replace one value. Unknown keys are accepted.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.current.insert(name.into(), value);
    }

    /// Merge a partial mapping into the current values
    pub fn set_many(&mut self, partial: Values) {
        self.current.extend(partial);
    }

    /// Back to the baseline
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    /// Replace the baseline and the current values with `initial`
    pub fn reset_to(&mut self, initial: Values) {
        self.current = initial.clone();
        self.initial = initial;
    }

    /// Names whose current value differs from the baseline, including keys
    /// only present on one side
    pub fn dirty_fields(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .current
            .iter()
            .filter(|(name, value)| self.initial.get(name.as_str()) != Some(*value))
            .map(|(name, _)| name.clone())
            .collect();
        names.extend(
            self.initial
                .keys()
                .filter(|name| !self.current.contains_key(name.as_str()))
                .cloned(),
        );
        names.sort();
        names
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.initial
    }
}
