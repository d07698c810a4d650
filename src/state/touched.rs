//! Touched tracker

use std::collections::BTreeSet;

/// Fields that have been blurred at least once (or swept by a submit)
#[derive(Debug, Clone, Default)]
pub struct TouchedTracker {
    fields: BTreeSet<String>,
}

impl TouchedTracker {
    /// Mark a field touched. Idempotent.
    pub fn touch(&mut self, name: impl Into<String>) {
        self.fields.insert(name.into());
    }

    pub fn touch_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    pub fn fields(&self) -> &BTreeSet<String> {
        &self.fields
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
