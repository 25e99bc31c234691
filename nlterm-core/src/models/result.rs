use serde::{Deserialize, Serialize};

/// The structured outcome of one executed command.
///
/// Exactly one of `output`/`error` is non-empty in the common case, though
/// both may be empty (a successful no-op) or both non-empty (a subprocess
/// that wrote to both streams).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub output: String,
    pub error: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// A successful result carrying stdout text.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: String::new(),
            exit_code: 0,
        }
    }

    /// A failed result carrying error text, exit code 1 by convention.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: error.into(),
            exit_code: 1,
        }
    }

    /// The no-op result for empty input: both streams empty, exit 0.
    pub fn empty() -> Self {
        Self {
            output: String::new(),
            error: String::new(),
            exit_code: 0,
        }
    }

    /// A result captured from a subprocess, carrying its own exit code.
    pub fn from_streams(output: String, error: String, exit_code: i32) -> Self {
        Self {
            output,
            error,
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
