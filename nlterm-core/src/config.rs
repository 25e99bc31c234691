use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{TermError, TermResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TermConfig {
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Whether natural-language assist is enabled at session start.
    #[serde(default = "default_true")]
    pub ai_enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    /// Falls back to GEMINI_API_KEY / GOOGLE_API_KEY when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on the translation network call. The call itself has no
    /// retry; a timeout degrades to executing the original text.
    #[serde(default = "default_translate_timeout")]
    pub translate_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Wall-clock cap on fallback subprocess execution.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_output_capacity")]
    pub output_capacity: usize,

    #[serde(default = "default_command_capacity")]
    pub command_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_translate_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    10
}

fn default_output_capacity() -> usize {
    50
}

fn default_command_capacity() -> usize {
    100
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            model: default_model(),
            api_key: None,
            translate_timeout_secs: default_translate_timeout(),
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            output_capacity: default_output_capacity(),
            command_capacity: default_command_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TermConfig {
    pub fn load() -> TermResult<Self> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> TermResult<Self> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        // Double underscore separates nesting levels so keys like
        // executor.command_timeout_secs stay addressable:
        // NLTERM_EXECUTOR__COMMAND_TIMEOUT_SECS=3
        builder = builder.add_source(
            Environment::with_prefix("NLTERM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut term_config: TermConfig = config.try_deserialize()?;

        if term_config.interpreter.api_key.is_none() {
            term_config.interpreter.api_key = std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .ok();
        }

        if let Ok(level) = std::env::var("NLTERM_LOG_LEVEL") {
            term_config.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            term_config.logging.level = level;
        }

        term_config.validate()?;

        Ok(term_config)
    }

    pub fn validate(&self) -> TermResult<()> {
        if self.interpreter.translate_timeout_secs == 0 {
            return Err(TermError::InvalidConfigValue {
                key: "interpreter.translate_timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.executor.command_timeout_secs == 0 {
            return Err(TermError::InvalidConfigValue {
                key: "executor.command_timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.history.output_capacity == 0 {
            return Err(TermError::InvalidConfigValue {
                key: "history.output_capacity".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.history.command_capacity == 0 {
            return Err(TermError::InvalidConfigValue {
                key: "history.command_capacity".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(TermError::InvalidConfigValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join("default.toml"));
        paths.push(cwd.join("config").join("local.toml"));
        paths.push(cwd.join("nlterm.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("nlterm").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".nlterm").join("config.toml"));
        paths.push(home.join(".config").join("nlterm").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
        paths.push(cwd.join(".env.local"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("nlterm").join(".env"));
    }

    for path in paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}
