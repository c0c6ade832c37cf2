//! Error types and exit codes for kpoint
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unreadable input, invalid catalog, etc.)
//!
//! The decision engines themselves never fail; errors only arise at the
//! edges where configuration, catalogs and input documents are loaded.

mod macros;

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the kpoint binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable input, invalid catalog (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading configuration, catalogs or inputs
#[derive(Error, Debug)]
pub enum KpointError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("--format may only be specified once")]
    DuplicateFormat,

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data errors (exit code 3)
    #[error("invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("invalid input in {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl KpointError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        KpointError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        KpointError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a catalog that failed validation
    pub fn invalid_catalog(reason: impl std::fmt::Display) -> Self {
        KpointError::InvalidCatalog {
            reason: reason.to_string(),
        }
    }

    /// Create an error for an input document that could not be parsed
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        KpointError::InvalidInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        KpointError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            KpointError::UnknownFormat(_)
            | KpointError::DuplicateFormat
            | KpointError::UsageError(_)
            | KpointError::InvalidValue { .. }
            | KpointError::Unsupported { .. } => ExitCode::Usage,

            KpointError::InvalidCatalog { .. } | KpointError::InvalidInput { .. } => {
                ExitCode::Data
            }

            KpointError::Io(_)
            | KpointError::Json(_)
            | KpointError::Toml(_)
            | KpointError::FailedOperationWithTarget { .. }
            | KpointError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            KpointError::UnknownFormat(_) => "unknown_format",
            KpointError::DuplicateFormat => "duplicate_format",
            KpointError::UsageError(_) => "usage_error",
            KpointError::InvalidValue { .. } => "invalid_value",
            KpointError::Unsupported { .. } => "unsupported",
            KpointError::InvalidCatalog { .. } => "invalid_catalog",
            KpointError::InvalidInput { .. } => "invalid_input",
            KpointError::Io(_) => "io_error",
            KpointError::Json(_) => "json_error",
            KpointError::Toml(_) => "toml_error",
            KpointError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            KpointError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for kpoint operations
pub type Result<T> = std::result::Result<T, KpointError>;
