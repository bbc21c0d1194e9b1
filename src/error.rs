//! Error types for the Hand2Note integration API.
//!
//! Every fallible operation in this crate returns [`ApiError`]. Variants carry
//! structured context and, where a lower-level error exists, chain it through
//! [`std::error::Error::source`].
//!
//! ## Error Categories
//!
//! - **Library Errors**: `h2napi.dll` missing, failing to load, or missing an export
//! - **Delivery Errors**: the native layer rejected a message with a non-zero code
//! - **Validation Errors**: malformed messages rejected before any native call
//! - **Configuration Errors**: unreadable or malformed YAML configuration
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use hand2note::ApiError;
//!
//! let error = ApiError::rejected("h2n_send_action", 3);
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::ffi::NulError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for API operations.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Main error type for the Hand2Note API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Hand2Note API library not found at {path}")]
    LibraryNotFound { path: PathBuf },

    #[error("Hand2Note API library does not export `{symbol}`")]
    MissingExport { symbol: &'static str },

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },

    #[error("Windows API error: {operation}")]
    #[cfg(windows)]
    WindowsApi {
        operation: String,
        #[source]
        source: core::Error,
    },

    #[error("{operation} rejected by Hand2Note with code {code}")]
    Rejected { operation: &'static str, code: i32 },

    #[error("Hand start carries {count} seats, at most {max} are supported")]
    TooManySeats { count: usize, max: usize },

    #[error("{message} is missing required field '{field}'")]
    MissingField { message: &'static str, field: &'static str },

    #[error("Invalid value for '{field}': {details}")]
    InvalidField { field: &'static str, details: String },

    #[error("Field '{field}' contains an interior NUL byte")]
    InvalidString {
        field: &'static str,
        #[source]
        source: NulError,
    },

    #[error("JSON payload is malformed")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Liveness probe failed: {reason}")]
    Probe { reason: String },

    #[error("Configuration error in {context}: {details}")]
    Config { context: String, details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Failed to start liveness monitor thread")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Rejected deliveries are deliberately not retryable: delivery is
    /// at-most-once from the caller's side.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Probe { .. } => true,
            ApiError::Timeout { .. } => true,
            ApiError::LibraryNotFound { .. } => false,
            ApiError::MissingExport { .. } => false,
            ApiError::UnsupportedPlatform { .. } => false,
            #[cfg(windows)]
            ApiError::WindowsApi { .. } => true,
            ApiError::Rejected { .. } => false,
            ApiError::TooManySeats { .. } => false,
            ApiError::MissingField { .. } => false,
            ApiError::InvalidField { .. } => false,
            ApiError::InvalidString { .. } => false,
            ApiError::InvalidJson { .. } => false,
            ApiError::Config { .. } => false,
            ApiError::File { .. } => false,
            ApiError::Spawn { .. } => true,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ApiError::LibraryNotFound { .. } => vec![
                "Place h2napi.dll in the x64 or x86 subdirectory next to the executable",
                "Set library_path in the client configuration",
                "Check the Hand2Note installation",
            ],
            ApiError::MissingExport { .. } => vec![
                "Update h2napi.dll to a version matching this crate",
                "Verify the library is the Hand2Note API and not another DLL",
            ],
            ApiError::UnsupportedPlatform { .. } => vec![
                "Run on Windows where Hand2Note is available",
                "Use a custom TrackerApi implementation for testing",
            ],
            #[cfg(windows)]
            ApiError::WindowsApi { .. } => vec![
                "Check the library matches the process architecture",
                "Verify the library dependencies are installed",
                "Check Windows permissions for the library path",
            ],
            ApiError::Rejected { .. } => vec![
                "Check the message fields against the Hand2Note API documentation",
                "Check the Hand2Note log for the rejection reason",
            ],
            ApiError::TooManySeats { .. } => vec![
                "Send at most ten seats per hand start",
                "Drop empty seats before building the message",
            ],
            ApiError::MissingField { .. } => vec![
                "Fill in the required field before sending",
                "Use make_table_name to build the table name",
            ],
            ApiError::InvalidField { .. } => vec![
                "Check the field value range",
                "Verify seat indices are below the table size",
            ],
            ApiError::InvalidString { .. } => vec![
                "Strip NUL characters from the text",
                "Verify the text is not binary data",
            ],
            ApiError::InvalidJson { .. } => vec![
                "Validate the JSON payload before sending",
                "Check string escaping in the payload",
            ],
            ApiError::Probe { .. } => vec![
                "Retry on the next poll cycle",
                "Verify the API library is loaded",
            ],
            ApiError::Config { .. } => vec![
                "Check the YAML syntax of the configuration",
                "Remove unknown or mistyped keys",
            ],
            ApiError::File { .. } => vec![
                "Check the file exists and is readable",
                "Check file permissions",
            ],
            ApiError::Timeout { .. } => vec![
                "Increase timeout duration",
                "Verify Hand2Note is started",
            ],
            ApiError::Spawn { .. } => vec![
                "Check process thread limits",
                "Drop unused liveness monitors",
            ],
        }
    }

    /// Helper constructor for rejected deliveries.
    pub fn rejected(operation: &'static str, code: i32) -> Self {
        ApiError::Rejected { operation, code }
    }

    /// Helper constructor for missing required fields.
    pub fn missing_field(message: &'static str, field: &'static str) -> Self {
        ApiError::MissingField { message, field }
    }

    /// Helper constructor for out-of-range or inconsistent field values.
    pub fn invalid_field(field: &'static str, details: impl Into<String>) -> Self {
        ApiError::InvalidField { field, details: details.into() }
    }

    /// Helper constructor for liveness probe failures.
    pub fn probe_failed(reason: impl Into<String>) -> Self {
        ApiError::Probe { reason: reason.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::Config { context: context.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ApiError::File { path, source }
    }

    /// Helper constructor for Windows API errors.
    #[cfg(windows)]
    pub fn windows_api_error(operation: impl Into<String>, source: core::Error) -> Self {
        ApiError::WindowsApi { operation: operation.into(), source }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        ApiError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(source: serde_json::Error) -> Self {
        ApiError::InvalidJson { source }
    }
}
