use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommandResult;

/// One logged (timestamp, command, result) triple in the output log.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub result: CommandResult,
}

impl ResultEntry {
    pub fn new(command: impl Into<String>, result: CommandResult) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.into(),
            result,
        }
    }

    /// Wall-clock time formatted the way the output log renders it.
    pub fn time_display(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
