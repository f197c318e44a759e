//! Error types for phpreqs operations.
//!
//! This module defines [`PhpReqsError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - An environment that does not meet a requirement is *data*, reported
//!   through [`RequirementResult`](crate::requirements::RequirementResult),
//!   never an error
//! - `InvalidArgument` is raised synchronously when a requirement is registered
//! - Use `anyhow::Error` (via `PhpReqsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for phpreqs operations.
#[derive(Debug, Error)]
pub enum PhpReqsError {
    /// A requirement could not be registered as given.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Requirements file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse requirements file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The PHP interpreter could not answer a query.
    #[error("Probe query '{query}' failed: {message}")]
    ProbeFailed { query: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for phpreqs operations.
pub type Result<T> = std::result::Result<T, PhpReqsError>;
