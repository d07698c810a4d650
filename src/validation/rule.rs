//! Rule descriptors
//!
//! A [`FieldRules`] is the declarative set of constraints attached to one
//! field. Every kind is optional and they combine freely; the engine decides
//! the order they run in, not the descriptor.

use crate::error::FormError;
use crate::Values;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type CustomFn = dyn Fn(&Value, &Values) -> Option<String> + Send + Sync;

/// Cross-field predicate. Receives the candidate value and the full value
/// snapshot, returns a message when the value is rejected.
#[derive(Clone)]
pub struct CustomRule(Arc<CustomFn>);

impl CustomRule {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Values) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the predicate. An empty message counts as a pass.
    pub fn check(&self, value: &Value, all: &Values) -> Option<String> {
        (self.0)(value, all).filter(|message| !message.is_empty())
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomRule(fn)")
    }
}

/// Pattern rule: compiled expression plus an optional override message
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "PatternDef")]
pub struct Pattern {
    regex: Regex,
    message: Option<String>,
}

impl Pattern {
    pub fn new(expr: &str) -> Result<Self, FormError> {
        Ok(Self {
            regex: Regex::new(expr)?,
            message: None,
        })
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Serialized shape of a pattern: either a bare expression or
/// `{ "regex": "...", "message": "..." }`
#[derive(Deserialize)]
#[serde(untagged)]
enum PatternDef {
    Bare(String),
    Full {
        regex: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl TryFrom<PatternDef> for Pattern {
    type Error = FormError;

    fn try_from(def: PatternDef) -> Result<Self, Self::Error> {
        match def {
            PatternDef::Bare(regex) => Pattern::new(&regex),
            PatternDef::Full { regex, message } => {
                let pattern = Pattern::new(&regex)?;
                Ok(match message {
                    Some(message) => pattern.with_message(message),
                    None => pattern,
                })
            }
        }
    }
}

/// Constraints for a single field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldRules {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub password: bool,
    #[serde(default)]
    pub phone: bool,
    #[serde(default)]
    pub date: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<Pattern>,
    /// Code-only; rule files cannot carry predicates
    #[serde(skip)]
    pub custom: Option<CustomRule>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    pub fn date(mut self) -> Self {
        self.date = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Values) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(CustomRule::new(f));
        self
    }
}

/// Rule declarations for a whole form, keyed by field name.
///
/// Immutable once handed to a form; the declared names are the only fields
/// that ever get validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, FieldRules>);

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.0.insert(name.into(), rules);
        self
    }

    /// Parse the declarative part of a rule set from JSON
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, name: &str) -> Option<&FieldRules> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
