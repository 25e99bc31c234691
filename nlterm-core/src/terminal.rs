//! The end-to-end pipeline: raw text in, logged result out.
//!
//! One in-flight command at a time; the session is threaded `&mut` through
//! each run, so no locking is involved.

use std::sync::Arc;

use tracing::debug;

use crate::config::TermConfig;
use crate::executor::Executor;
use crate::interpreter::{GeminiTranslator, Interpreter, Translator};
use crate::models::{CommandResult, ResultEntry};
use crate::session::Session;

/// What one pipeline run produced, for the presentation layer.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The command that was actually executed (translated form, when
    /// translation happened).
    pub command: String,
    /// The translation, when the language model produced one.
    pub translated: Option<String>,
    /// Non-fatal notice (translation failure); never blocks execution.
    pub notice: Option<String>,
    pub result: CommandResult,
}

pub struct Terminal {
    interpreter: Interpreter,
    executor: Executor,
}

impl Terminal {
    pub fn new(interpreter: Interpreter, executor: Executor) -> Self {
        Self {
            interpreter,
            executor,
        }
    }

    /// Build the production pipeline: Gemini-backed interpreter and an
    /// executor with the configured subprocess timeout.
    pub fn from_config(config: &TermConfig) -> Self {
        let mut translator = GeminiTranslator::new(
            config.interpreter.model.clone(),
            config.interpreter.translate_timeout_secs,
        );
        if let Some(key) = &config.interpreter.api_key {
            translator = translator.with_api_key(key.clone());
        }

        Self {
            interpreter: Interpreter::new(Arc::new(translator) as Arc<dyn Translator>),
            executor: Executor::from_config(&config.executor),
        }
    }

    /// Run one raw input through resolve → execute → log.
    ///
    /// The executed command is appended to the command history and the
    /// timestamped result entry to the output log. After `clear`, the
    /// confirmation entry is the sole surviving log entry.
    pub async fn run(&self, session: &mut Session, raw: &str) -> RunOutcome {
        let interpretation = self.interpreter.resolve(raw, session.ai_enabled()).await;
        debug!(raw = raw, command = %interpretation.command, "Running command");

        let result = self.executor.execute(&interpretation.command, session).await;

        session.record_command(interpretation.command.clone());
        session.push_entry(ResultEntry::new(
            interpretation.command.clone(),
            result.clone(),
        ));

        RunOutcome {
            command: interpretation.command,
            translated: interpretation.translated,
            notice: interpretation.notice,
            result,
        }
    }
}
