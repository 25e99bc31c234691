//! Error types for the nlterm core library.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Config | Configuration file and validation errors |
//! | E2001-E2099 | Translation | Language-model translation errors |
//! | E3001-E3099 | Execution | Built-in and subprocess execution errors |
//! | E9001-E9099 | General | Internal, IO, and serialization errors |

use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the nlterm core library.
#[derive(Debug, Error)]
pub enum TermError {
    // ========================================================================
    // Configuration Errors (E1001-E1099)
    // ========================================================================
    /// Configuration file parse error
    #[error("[E1001] Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Invalid configuration value
    #[error("[E1002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Translation Errors (E2001-E2099)
    // ========================================================================
    /// Translation API request failed
    #[error("[E2001] Translation request failed: {0}")]
    TranslationRequestFailed(String),

    /// Translation API response could not be parsed
    #[error("[E2002] Failed to parse translation response: {0}")]
    TranslationParseError(String),

    /// Translation API call exceeded its configured time bound
    #[error("[E2003] Translation timed out after {0} seconds")]
    TranslationTimeout(u64),

    /// No API credential is configured for the translation service
    #[error("[E2004] Translation service has no API key configured")]
    TranslationKeyMissing,

    // ========================================================================
    // Execution Errors (E3001-E3099)
    // ========================================================================
    /// A path given to a directory operation does not exist
    #[error("[E3001] Directory not found: {0}")]
    DirectoryNotFound(String),

    /// The OS denied access to a filesystem resource
    #[error("[E3002] Permission denied")]
    PermissionDenied,

    /// A built-in was invoked with missing or invalid arguments
    #[error("[E3003] {0}")]
    UsageError(String),

    /// A fallback subprocess exceeded the execution timeout
    #[error("[E3004] Command timed out")]
    CommandTimeout,

    /// A fallback subprocess failed to launch
    #[error("[E3005] Command not found: {0}")]
    CommandNotFound(String),

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// Internal error (catch-all for unexpected conditions)
    #[error("[E9001] Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("[E9002] IO error: {0}")]
    Io(String),

    /// Serialization/deserialization error
    #[error("[E9003] Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for nlterm operations.
pub type TermResult<T> = Result<T, TermError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<std::io::Error> for TermError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => TermError::PermissionDenied,
            std::io::ErrorKind::NotFound => TermError::DirectoryNotFound(err.to_string()),
            _ => TermError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TermError {
    fn from(err: serde_json::Error) -> Self {
        TermError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TermError {
    fn from(err: config::ConfigError) -> Self {
        TermError::ConfigParse(err.to_string())
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl TermError {
    /// Returns true if this error came from the translation collaborator.
    ///
    /// Translation errors are never fatal: the interpreter degrades to
    /// executing the original text.
    pub fn is_translation_error(&self) -> bool {
        matches!(
            self,
            TermError::TranslationRequestFailed(_)
                | TermError::TranslationParseError(_)
                | TermError::TranslationTimeout(_)
                | TermError::TranslationKeyMissing
        )
    }

    /// Returns true if this error is a user-facing validation failure
    /// (bad path, missing argument) rather than an environment fault.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            TermError::DirectoryNotFound(_) | TermError::UsageError(_)
        )
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            TermError::ConfigParse(_) => "E1001",
            TermError::InvalidConfigValue { .. } => "E1002",
            TermError::TranslationRequestFailed(_) => "E2001",
            TermError::TranslationParseError(_) => "E2002",
            TermError::TranslationTimeout(_) => "E2003",
            TermError::TranslationKeyMissing => "E2004",
            TermError::DirectoryNotFound(_) => "E3001",
            TermError::PermissionDenied => "E3002",
            TermError::UsageError(_) => "E3003",
            TermError::CommandTimeout => "E3004",
            TermError::CommandNotFound(_) => "E3005",
            TermError::Internal(_) => "E9001",
            TermError::Io(_) => "E9002",
            TermError::Serialization(_) => "E9003",
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_translation_error() || self.is_validation_error() {
            warn!(error_code = %code, "Recoverable error: {}", self);
        } else {
            error!(error_code = %code, "Error occurred: {}", self);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
