//! Per-session mutable state: current directory, histories, and the
//! natural-language assist toggle.
//!
//! The session is an explicit object threaded `&mut` through the pipeline.
//! There is exactly one in-flight command at a time, so no locking is needed.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TermError, TermResult};
use crate::models::ResultEntry;

pub const DEFAULT_OUTPUT_CAPACITY: usize = 50;
pub const DEFAULT_COMMAND_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct Session {
    current_dir: PathBuf,
    command_history: VecDeque<String>,
    output_history: VecDeque<ResultEntry>,
    ai_enabled: bool,
    output_capacity: usize,
    command_capacity: usize,
}

impl Session {
    /// Create a session rooted at the process's working directory.
    pub fn new() -> TermResult<Self> {
        let cwd = std::env::current_dir()?;
        Self::with_dir(cwd)
    }

    /// Create a session rooted at an explicit directory. The directory must
    /// exist; it is canonicalized to its absolute form.
    pub fn with_dir(dir: impl AsRef<Path>) -> TermResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TermError::DirectoryNotFound(dir.display().to_string()));
        }
        Ok(Self {
            current_dir: dir.canonicalize()?,
            command_history: VecDeque::new(),
            output_history: VecDeque::new(),
            ai_enabled: true,
            output_capacity: DEFAULT_OUTPUT_CAPACITY,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
        })
    }

    pub fn with_capacities(mut self, output_capacity: usize, command_capacity: usize) -> Self {
        self.output_capacity = output_capacity.max(1);
        self.command_capacity = command_capacity.max(1);
        self
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Commit a new current directory. Invariant: the path must be an
    /// existing directory; it is stored in absolute form.
    pub fn set_current_dir(&mut self, dir: impl AsRef<Path>) -> TermResult<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TermError::DirectoryNotFound(dir.display().to_string()));
        }
        self.current_dir = dir.canonicalize()?;
        debug!(dir = %self.current_dir.display(), "Changed current directory");
        Ok(())
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.ai_enabled = enabled;
    }

    /// Append a raw command string to the bounded command history.
    pub fn record_command(&mut self, command: impl Into<String>) {
        if self.command_history.len() == self.command_capacity {
            self.command_history.pop_front();
        }
        self.command_history.push_back(command.into());
    }

    /// Append a result entry, evicting the oldest once the cap is exceeded.
    pub fn push_entry(&mut self, entry: ResultEntry) {
        if self.output_history.len() == self.output_capacity {
            self.output_history.pop_front();
        }
        self.output_history.push_back(entry);
    }

    /// Truncate the output log. Backs the `clear`/`cls` built-in.
    pub fn clear_output(&mut self) {
        self.output_history.clear();
    }

    pub fn command_history(&self) -> impl Iterator<Item = &str> {
        self.command_history.iter().map(String::as_str)
    }

    pub fn output_history(&self) -> impl Iterator<Item = &ResultEntry> {
        self.output_history.iter()
    }

    pub fn output_len(&self) -> usize {
        self.output_history.len()
    }

    /// The most recent `n` commands, newest first. Backs history replay.
    pub fn recent_commands(&self, n: usize) -> Vec<&str> {
        self.command_history
            .iter()
            .rev()
            .take(n)
            .map(String::as_str)
            .collect()
    }
}
