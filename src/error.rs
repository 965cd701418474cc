//! Error types for the Azimuth library.
//!
//! All errors are represented by the [`AzimuthError`] enum. Errors surface
//! synchronously to the caller constructing or decoding a sort clause; none
//! are retried and none abort more than the single clause being built.
//!
//! # Examples
//!
//! ```
//! use azimuth::error::{AzimuthError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AzimuthError::configuration("no points supplied"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Azimuth operations.
///
/// Domain variants carry the full user-facing message so callers comparing
/// against documented error strings see them verbatim.
#[derive(Error, Debug)]
pub enum AzimuthError {
    /// Malformed point encoding or array arity.
    #[error("{0}")]
    Parse(String),

    /// Coordinate out of range under strict validation.
    #[error("{0}")]
    Validation(String),

    /// Invalid sort configuration (unsupported mode, empty point list,
    /// conflicting nested paths, unknown wire key).
    #[error("{0}")]
    Configuration(String),

    /// Unrecognized enumerated name (unit, algorithm, mode, order,
    /// validation method).
    #[error("{0}")]
    UnsupportedValue(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with AzimuthError.
pub type Result<T> = std::result::Result<T, AzimuthError>;

impl AzimuthError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        AzimuthError::Parse(msg.into())
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AzimuthError::Validation(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        AzimuthError::Configuration(msg.into())
    }

    /// Create a new unsupported value error.
    pub fn unsupported_value<S: Into<String>>(msg: S) -> Self {
        AzimuthError::UnsupportedValue(msg.into())
    }
}
