//! Rule sets for the HR data-entry screens
//!
//! Each preset bundles the fields a screen edits, their rules, blank
//! initial values and the endpoint the screen submits to.

use crate::error::FormError;
use crate::transport::Method;
use crate::validation::library;
use crate::validation::{FieldRules, Pattern, RuleSet};
use crate::Values;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use serde_json::Value;

static EMPLOYEE_CODE: Lazy<Pattern> = Lazy::new(|| {
    Pattern::new(r"^EMP-\d{4,}$")
        .unwrap()
        .with_message("Employee code must look like EMP-0001")
});

static CLOCK_TIME: Lazy<Pattern> = Lazy::new(|| {
    Pattern::new(r"^([01]\d|2[0-3]):[0-5]\d$")
        .unwrap()
        .with_message("Use 24-hour HH:MM")
});

static PAY_PERIOD: Lazy<Pattern> = Lazy::new(|| {
    Pattern::new(r"^\d{4}-(0[1-9]|1[0-2])$")
        .unwrap()
        .with_message("Pay period must be YYYY-MM")
});

static DOCUMENT_FILE: Lazy<Pattern> = Lazy::new(|| {
    Pattern::new(r"(?i)\.(pdf|docx?|png|jpe?g)$")
        .unwrap()
        .with_message("Only PDF, Word or image files are accepted")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Employee,
    Attendance,
    Leave,
    Payroll,
    Travel,
    Document,
    PasswordChange,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Employee,
        Preset::Attendance,
        Preset::Leave,
        Preset::Payroll,
        Preset::Travel,
        Preset::Document,
        Preset::PasswordChange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Attendance => "attendance",
            Self::Leave => "leave",
            Self::Payroll => "payroll",
            Self::Travel => "travel",
            Self::Document => "document",
            Self::PasswordChange => "password-change",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| FormError::UnknownPreset(name.to_string()))
    }

    /// Path the screen submits to, relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Employee => "/employees",
            Self::Attendance => "/attendance",
            Self::Leave => "/leave-requests",
            Self::Payroll => "/payroll",
            Self::Travel => "/travel-requests",
            Self::Document => "/documents",
            Self::PasswordChange => "/account/password",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::PasswordChange => Method::Put,
            _ => Method::Post,
        }
    }

    /// Every declared field, blank
    pub fn initial_values(&self) -> Values {
        self.rules()
            .names()
            .map(|name| (name.to_string(), Value::String(String::new())))
            .collect()
    }

    pub fn rules(&self) -> RuleSet {
        match self {
            Self::Employee => employee_rules(),
            Self::Attendance => attendance_rules(),
            Self::Leave => leave_rules(),
            Self::Payroll => payroll_rules(),
            Self::Travel => travel_rules(),
            Self::Document => document_rules(),
            Self::PasswordChange => password_change_rules(),
        }
    }
}

fn employee_rules() -> RuleSet {
    RuleSet::new()
        .field("employee_code", FieldRules::new().pattern(EMPLOYEE_CODE.clone()))
        .field("first_name", FieldRules::new().required().max_length(50))
        .field("last_name", FieldRules::new().required().max_length(50))
        .field("email", FieldRules::new().required().email())
        .field("phone", FieldRules::new().phone())
        .field("date_of_birth", FieldRules::new().date())
        .field("hire_date", FieldRules::new().required().date())
        .field("department", FieldRules::new().required())
        .field("position", FieldRules::new().required())
        .field("salary", FieldRules::new().custom(non_negative_amount))
}

fn attendance_rules() -> RuleSet {
    RuleSet::new()
        .field("employee_id", FieldRules::new().required())
        .field("date", FieldRules::new().required().date())
        .field("check_in", FieldRules::new().required().pattern(CLOCK_TIME.clone()))
        .field(
            "check_out",
            FieldRules::new()
                .pattern(CLOCK_TIME.clone())
                .custom(|value, all| {
                    let check_in = clock_time(all.get("check_in")?)?;
                    let check_out = clock_time(value)?;
                    (check_out <= check_in)
                        .then(|| "Check-out must be after check-in".to_string())
                }),
        )
        .field("status", FieldRules::new().required())
}

fn leave_rules() -> RuleSet {
    RuleSet::new()
        .field("employee_id", FieldRules::new().required())
        .field("leave_type", FieldRules::new().required())
        .field("start_date", FieldRules::new().required().date())
        .field(
            "end_date",
            FieldRules::new()
                .required()
                .date()
                .custom(not_before("start_date", "End date cannot be before start date")),
        )
        .field(
            "reason",
            FieldRules::new().required().min_length(10).max_length(500),
        )
}

fn payroll_rules() -> RuleSet {
    RuleSet::new()
        .field("employee_id", FieldRules::new().required())
        .field("pay_period", FieldRules::new().required().pattern(PAY_PERIOD.clone()))
        .field(
            "basic_salary",
            FieldRules::new().required().custom(non_negative_amount),
        )
        .field("allowances", FieldRules::new().custom(non_negative_amount))
        .field(
            "deductions",
            FieldRules::new().custom(|value, all| {
                if let Some(message) = non_negative_amount(value, all) {
                    return Some(message);
                }
                let deductions = amount(value)?;
                let gross = amount(all.get("basic_salary")?).unwrap_or(0.0)
                    + all.get("allowances").and_then(amount).unwrap_or(0.0);
                (deductions > gross).then(|| "Deductions cannot exceed gross pay".to_string())
            }),
        )
}

fn travel_rules() -> RuleSet {
    RuleSet::new()
        .field("employee_id", FieldRules::new().required())
        .field("destination", FieldRules::new().required().max_length(100))
        .field("purpose", FieldRules::new().required().min_length(10))
        .field("departure_date", FieldRules::new().required().date())
        .field(
            "return_date",
            FieldRules::new().required().date().custom(not_before(
                "departure_date",
                "Return date cannot be before departure date",
            )),
        )
        .field("estimated_cost", FieldRules::new().custom(non_negative_amount))
}

fn document_rules() -> RuleSet {
    RuleSet::new()
        .field("title", FieldRules::new().required().max_length(120))
        .field("category", FieldRules::new().required())
        .field("employee_id", FieldRules::new().required())
        .field(
            "file_name",
            FieldRules::new().required().pattern(DOCUMENT_FILE.clone()),
        )
        .field("expiry_date", FieldRules::new().date())
}

fn password_change_rules() -> RuleSet {
    RuleSet::new()
        .field("current_password", FieldRules::new().required())
        .field(
            "new_password",
            FieldRules::new().required().password().custom(|value, all| {
                (all.get("current_password") == Some(value))
                    .then(|| "New password must differ from the current one".to_string())
            }),
        )
        .field(
            "confirm_password",
            FieldRules::new().required().custom(|value, all| {
                (all.get("new_password") != Some(value))
                    .then(|| "Passwords do not match".to_string())
            }),
        )
}

/// Finite numeric value of a number or numeric string; blanks, `inf` and
/// `NaN` have none
fn amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn non_negative_amount(value: &Value, _all: &Values) -> Option<String> {
    if library::is_empty(value) {
        return None;
    }
    match amount(value) {
        Some(n) if n >= 0.0 => None,
        Some(_) => Some("Amount cannot be negative".to_string()),
        None => Some("Please enter a number".to_string()),
    }
}

fn calendar_day(value: &Value) -> Option<NaiveDate> {
    library::parse_date(value.as_str()?)
}

fn clock_time(value: &Value) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.as_str()?, "%H:%M").ok()
}

/// Cross-field rule: this date must not fall before the date in `other`.
/// Unparseable dates are left to the `date` rule.
fn not_before(
    other: &'static str,
    message: &'static str,
) -> impl Fn(&Value, &Values) -> Option<String> + Send + Sync + 'static {
    move |value: &Value, all: &Values| {
        let start = calendar_day(all.get(other)?)?;
        let end = calendar_day(value)?;
        (end < start).then(|| message.to_string())
    }
}
