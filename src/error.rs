//! Error types for the form engine

use thiserror::Error;

/// Errors surfaced by the form engine.
///
/// Field validation failures are never represented here; they are plain
/// messages stored in the form's error map.
#[derive(Debug, Error)]
pub enum FormError {
    /// A `pattern` rule was declared with an expression that does not compile
    #[error("invalid pattern for rule: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The injected transport rejected the submission
    #[error(transparent)]
    Transport(anyhow::Error),

    /// The completion callback failed after a successful submission
    #[error(transparent)]
    Callback(anyhow::Error),

    #[error("unknown form preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
