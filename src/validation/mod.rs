//! Declarative field validation

mod engine;
pub mod library;
mod rule;

pub use engine::Validator;
pub use rule::{CustomRule, FieldRules, Pattern, RuleSet};
