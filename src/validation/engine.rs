//! Validation engine
//!
//! Applies a [`RuleSet`] to candidate values. Rules for one field run in a
//! fixed order (required, email, password, phone, date, min length, max
//! length, pattern, custom) and the first failure is the field's message.

use super::library;
use super::rule::{FieldRules, RuleSet};
use crate::state::Errors;
use crate::Values;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: RuleSet,
}

impl Validator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate one field. `None` means valid; undeclared fields are always
    /// valid.
    pub fn validate_field(&self, name: &str, value: &Value, all: &Values) -> Option<String> {
        let rules = self.rules.get(name)?;
        let message = check(rules, value, all);
        tracing::debug!(field = name, error = ?message, "validated field");
        message
    }

    /// Validate every declared field against `values`. A declared field with
    /// no entry in `values` is validated as `null`.
    pub fn validate_all(&self, values: &Values) -> Errors {
        self.rules
            .names()
            .filter_map(|name| {
                let value = values.get(name).unwrap_or(&Value::Null);
                self.validate_field(name, value, values)
                    .map(|message| (name.to_string(), message))
            })
            .collect()
    }
}

fn check(rules: &FieldRules, value: &Value, all: &Values) -> Option<String> {
    if library::is_empty(value) {
        if rules.required {
            return Some(library::REQUIRED_MESSAGE.to_string());
        }
        // Optional and blank: only a cross-field rule can object
        return rules.custom.as_ref().and_then(|rule| rule.check(value, all));
    }

    // Arrays and objects have no text form; format rules pass them
    let text = library::as_text(value);
    let text = text.as_deref();

    if rules.email && text.is_some_and(|t| !library::is_email(t)) {
        return Some(library::EMAIL_MESSAGE.to_string());
    }
    if rules.password && text.is_some_and(|t| !library::is_strong_password(t)) {
        return Some(library::PASSWORD_MESSAGE.to_string());
    }
    if rules.phone && text.is_some_and(|t| !library::is_phone(t)) {
        return Some(library::PHONE_MESSAGE.to_string());
    }
    if rules.date && text.is_some() && !library::is_date_value(value) {
        return Some(library::DATE_MESSAGE.to_string());
    }

    let length = library::length_of(value);
    if let (Some(min), Some(len)) = (rules.min_length, length) {
        if len < min {
            return Some(library::min_length_message(min, value));
        }
    }
    if let (Some(max), Some(len)) = (rules.max_length, length) {
        if len > max {
            return Some(library::max_length_message(max, value));
        }
    }

    if let Some(pattern) = &rules.pattern {
        if text.is_some_and(|t| !library::matches(pattern.regex(), t)) {
            return Some(
                pattern
                    .message()
                    .unwrap_or(library::PATTERN_MESSAGE)
                    .to_string(),
            );
        }
    }

    rules.custom.as_ref().and_then(|rule| rule.check(value, all))
}
