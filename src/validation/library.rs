//! Rule library
//!
//! Pure predicates used by the validation engine. None of these hold state
//! and none of them fail with an error: they answer yes or no.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters with uppercase, lowercase, and number";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const DATE_MESSAGE: &str = "Please enter a valid date";
pub const PATTERN_MESSAGE: &str = "Invalid format";

/// Minimum number of digits a phone number must carry
const PHONE_MIN_DIGITS: usize = 10;
const PASSWORD_MIN_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Accepted textual date layouts besides RFC 3339 and RFC 2822
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

pub fn min_length_message(min: usize, value: &Value) -> String {
    format!("Must be at least {} {}", min, length_unit(value))
}

pub fn max_length_message(max: usize, value: &Value) -> String {
    format!("Must be no more than {} {}", max, length_unit(value))
}

/// What [`length_of`] counts for this value
fn length_unit(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "items",
        _ => "characters",
    }
}

/// Absence, `null` or the empty string. `false` and `0` are real values.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Text form of a scalar value, used by the format rules.
///
/// Arrays and objects have no text form and skip format checks.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loose `local@domain.tld` shape check
pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn is_strong_password(s: &str) -> bool {
    s.chars().count() >= PASSWORD_MIN_CHARS
        && s.chars().any(|c| c.is_uppercase())
        && s.chars().any(|c| c.is_lowercase())
        && s.chars().any(|c| c.is_ascii_digit())
}

/// Digits, spaces and hyphens with an optional leading `+`
pub fn is_phone(s: &str) -> bool {
    let body = s.strip_prefix('+').unwrap_or(s);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return false;
    }
    body.chars().filter(|c| c.is_ascii_digit()).count() >= PHONE_MIN_DIGITS
}

/// Calendar day of a date string in any accepted layout
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub fn is_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Date check over any value: strings are parsed, numbers are read as
/// millisecond timestamps.
pub fn is_date_value(value: &Value) -> bool {
    match value {
        Value::String(s) => is_date(s),
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64))
            .is_some(),
        _ => false,
    }
}

/// Character count for strings, element count for arrays.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

pub fn matches(pattern: &Regex, s: &str) -> bool {
    pattern.is_match(s)
}
