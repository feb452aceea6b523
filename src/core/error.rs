//! Error types for scheduler and store operations.

use thiserror::Error;

/// Errors produced by the rotation scheduler surface.
#[derive(Debug, Error)]
pub enum RotationError {
    /// Interval must be strictly positive.
    #[error("invalid interval: must be greater than zero")]
    InvalidInterval,
    /// Store lookup failed while validating a new schedule.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The event loop is no longer running.
    #[error("rotation loop has shut down")]
    Shutdown,
}

/// Failures reported by a tag store or banner applier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A referenced tag is not known to the store.
    #[error("unknown tag: {0}")]
    UnknownTag(String),
    /// The tag's URL does not point at a jpg/jpeg/png image.
    #[error("unsupported image type for tag {0}")]
    UnsupportedImage(String),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors produced while loading configuration or parsing intervals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Input could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
    /// A field holds an out-of-range value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
