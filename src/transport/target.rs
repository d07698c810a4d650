//! Where and how a form submits

use crate::config::FormsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP verb the transport is asked to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTarget {
    pub endpoint: String,
    pub method: Method,
}

impl SubmitTarget {
    pub fn new(endpoint: impl Into<String>, method: Method) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
        }
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::Post)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::Put)
    }

    /// Resolve `path` against the configured base URL. Without a base URL the
    /// path is used as-is; without a method the configured default applies.
    pub fn resolve(config: &FormsConfig, path: &str, method: Option<Method>) -> Self {
        let endpoint = match config.api_base_url.as_deref() {
            Some(base) if !base.is_empty() => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            _ => path.to_string(),
        };
        Self::new(endpoint, method.unwrap_or_else(|| config.method_or_default()))
    }
}

impl fmt::Display for SubmitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_labels() {
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::default(), Method::Post);
    }

    #[test]
    fn test_resolve_without_base_url_keeps_path() {
        let target = SubmitTarget::resolve(&FormsConfig::default(), "/employees", None);
        assert_eq!(target, SubmitTarget::post("/employees"));
    }

    #[test]
    fn test_resolve_joins_base_url_and_path() {
        let config = FormsConfig {
            api_base_url: Some("https://hr.example.com/api/".to_string()),
            ..Default::default()
        };
        let target = SubmitTarget::resolve(&config, "/payroll", Some(Method::Put));
        assert_eq!(target.endpoint, "https://hr.example.com/api/payroll");
        assert_eq!(target.method, Method::Put);
    }

    #[test]
    fn test_resolve_uses_configured_default_method() {
        let config = FormsConfig {
            default_method: Some(Method::Put),
            ..Default::default()
        };
        let target = SubmitTarget::resolve(&config, "travel", None);
        assert_eq!(target.method, Method::Put);
    }

    #[test]
    fn test_display() {
        assert_eq!(SubmitTarget::put("/documents/7").to_string(), "PUT /documents/7");
    }
}
