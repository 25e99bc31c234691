//! The command executor: runs a resolved command string against the
//! session's current directory and produces a [`CommandResult`].
//!
//! Built-in verbs dispatch to native handlers; everything else is handed to
//! the OS shell with a timeout. Every error is converted into a failure
//! result at this boundary; nothing propagates to the caller.

mod builtins;
mod shell;
mod system;

use std::time::Duration;

use tracing::debug;

use crate::config::ExecutorConfig;
use crate::error::{TermError, TermResult};
use crate::metrics::SystemCollector;
use crate::models::CommandResult;
use crate::session::Session;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Executor {
    command_timeout: Duration,
    collector: SystemCollector,
}

impl Executor {
    pub fn new() -> Self {
        Self {
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            collector: SystemCollector::new(),
        }
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::new().with_timeout(Duration::from_secs(config.command_timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Execute a resolved command string. Empty or whitespace-only input is
    /// a no-op, not an error.
    pub async fn execute(&self, command: &str, session: &mut Session) -> CommandResult {
        if command.trim().is_empty() {
            return CommandResult::empty();
        }

        self.dispatch(command, session)
            .await
            .unwrap_or_else(error_result)
    }

    async fn dispatch(&self, command: &str, session: &mut Session) -> TermResult<CommandResult> {
        // Shell-word splitting; unparsable quoting goes to the shell verbatim.
        let args = match shlex::split(command) {
            Some(args) if !args.is_empty() => args,
            _ => {
                return shell::run_fallback(command, session.current_dir(), self.command_timeout)
                    .await
            }
        };

        let verb = args[0].to_lowercase();
        debug!(verb = %verb, "Dispatching command");

        match verb.as_str() {
            "pwd" => builtins::pwd(session),
            "cd" => builtins::cd(&args, session),
            "ls" | "dir" => builtins::ls(session),
            "mkdir" => builtins::mkdir(&args, session),
            "ps" => system::ps(&self.collector).await,
            "top" | "htop" => system::top(&self.collector).await,
            "clear" | "cls" => builtins::clear(session),
            "help" => builtins::help(),
            _ => shell::run_fallback(command, session.current_dir(), self.command_timeout).await,
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map handler errors onto the user-facing error text the result contract
/// promises, without the log-oriented error codes.
fn error_result(err: TermError) -> CommandResult {
    match err {
        TermError::DirectoryNotFound(path) => {
            CommandResult::failure(format!("Directory not found: {path}"))
        }
        TermError::PermissionDenied => CommandResult::failure("Permission denied"),
        TermError::UsageError(message) => CommandResult::failure(message),
        TermError::CommandTimeout => CommandResult::failure("Command timed out"),
        TermError::CommandNotFound(verb) => {
            CommandResult::failure(format!("Command not found: {verb}"))
        }
        TermError::Io(message) => CommandResult::failure(message),
        other => CommandResult::failure(other.to_string()),
    }
}
