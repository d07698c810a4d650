//! Trait abstraction for the submission transport to enable mocking in tests

use crate::Values;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Asynchronous transport a form submits through.
///
/// Implementations own timeouts and retries; the form calls exactly one of
/// `post`/`put` per submission and treats any `Err` as a failed submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Create a resource from the form values
    async fn post(&self, endpoint: &str, payload: &Values) -> Result<Value>;

    /// Update a resource from the form values
    async fn put(&self, endpoint: &str, payload: &Values) -> Result<Value>;

    /// Whether the transport has a request of its own in flight
    fn is_loading(&self) -> bool {
        false
    }
}
