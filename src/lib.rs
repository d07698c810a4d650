//! HRM forms - form state and validation engine
//!
//! Backs every data-entry screen of the HR application (employees,
//! attendance, leave, payroll, travel, documents). A [`Form`] owns the
//! values a screen edits, validates them against a declarative
//! [`RuleSet`], tracks which fields the user has visited and drives the
//! submission through an injected [`Transport`].

pub mod config;
pub mod error;
pub mod form;
pub mod presets;
pub mod state;
pub mod transport;
pub mod validation;

/// Field name to value. Insertion order carries no meaning.
pub type Values = serde_json::Map<String, serde_json::Value>;

pub use config::FormsConfig;
pub use error::FormError;
pub use form::{ChangeEvent, Form, FormBuilder, SubmitOutcome, SubmitPhase};
pub use presets::Preset;
pub use state::{Errors, SUBMIT_ERROR_KEY};
pub use transport::{Method, SubmitTarget, Transport};
pub use validation::{FieldRules, Pattern, RuleSet};
