//! Error types for curl-builder
//!
//! Quoting, templating and rendering are total and never fail. Errors only
//! come from caller input that cannot be expressed as options or decoded.

use thiserror::Error;

/// Result type alias using curl-builder's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// curl-builder error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Option input has a shape that cannot be normalized into slots.
    #[error("invalid option input: {0}")]
    InvalidOption(String),

    /// Unknown quote style name.
    #[error("invalid quote style: {0} (expected single, double or none)")]
    InvalidQuoteStyle(String),

    /// JSON decoding of option or request input failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid option error.
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::InvalidOption(message.into())
    }
}
