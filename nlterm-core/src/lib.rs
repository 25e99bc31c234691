//! Core library for nlterm: a terminal front-end that accepts either
//! literal built-in commands or natural language, translates the latter
//! through a hosted language model, executes against the session's current
//! directory, and keeps a bounded log of results.

pub mod config;
pub mod error;
pub mod executor;
pub mod interpreter;
pub mod metrics;
pub mod models;
pub mod session;
pub mod terminal;

pub use config::{ExecutorConfig, HistoryConfig, InterpreterConfig, LoggingConfig, TermConfig};
pub use error::{TermError, TermResult};
pub use executor::Executor;
pub use interpreter::{is_builtin, GeminiTranslator, Interpretation, Interpreter, Translator};
pub use metrics::SystemCollector;
pub use models::{
    CommandResult, DiskUsage, MemoryUsage, ProcessInfo, ResultEntry, SystemSnapshot,
};
pub use session::Session;
pub use terminal::{RunOutcome, Terminal};
