//! The command interpreter: classifies raw input as a literal built-in
//! command or natural language, and translates the latter through the
//! language-model collaborator.
//!
//! Translation failures never abort execution. The original text is always
//! the fallback, and the failure surfaces only as a notice for the
//! presentation layer.

mod translator;

pub use translator::{GeminiTranslator, Translator};

use std::sync::Arc;

use tracing::{debug, info, warn};

/// The fixed set of verbs handled natively without shelling out.
pub const BUILTIN_VERBS: [&str; 11] = [
    "ls", "dir", "cd", "pwd", "mkdir", "ps", "top", "htop", "clear", "cls", "help",
];

/// Returns true if the verb is one of the built-in command names.
pub fn is_builtin(verb: &str) -> bool {
    BUILTIN_VERBS.contains(&verb)
}

/// The outcome of resolving one raw input string.
#[derive(Debug, Clone)]
pub struct Interpretation {
    /// The command handed to the executor.
    pub command: String,
    /// The translated form, when the language model produced one.
    pub translated: Option<String>,
    /// Non-fatal notice for the presentation layer (translation failures).
    pub notice: Option<String>,
}

impl Interpretation {
    fn literal(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            translated: None,
            notice: None,
        }
    }
}

/// Decides whether raw input is a literal built-in command or natural
/// language needing translation. Never mutates session state.
pub struct Interpreter {
    translator: Option<Arc<dyn Translator>>,
}

impl Interpreter {
    /// An interpreter with no translation collaborator: all input is literal.
    pub fn literal_only() -> Self {
        Self { translator: None }
    }

    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator: Some(translator),
        }
    }

    /// Resolve raw input into an executable command string.
    ///
    /// The first whitespace token, lower-cased, decides: built-in verbs pass
    /// through unchanged, and so does everything else when assist is off.
    /// Otherwise the text goes to the translator once; `unknown`, an empty
    /// reply, or any error falls back to the original text.
    pub async fn resolve(&self, raw: &str, ai_enabled: bool) -> Interpretation {
        let first_token = raw.split_whitespace().next().unwrap_or("");
        if first_token.is_empty() || is_builtin(first_token.to_lowercase().as_str()) {
            return Interpretation::literal(raw);
        }

        if !ai_enabled {
            debug!("Assist disabled, passing input through literally");
            return Interpretation::literal(raw);
        }

        let Some(translator) = &self.translator else {
            return Interpretation::literal(raw);
        };

        match translator.translate(raw).await {
            Ok(reply) => {
                let command = reply.trim().to_lowercase();
                if command.is_empty() || command == "unknown" {
                    debug!(input = raw, "Translator could not map input to a command");
                    return Interpretation::literal(raw);
                }
                info!(input = raw, command = %command, "Translated natural language input");
                Interpretation {
                    command: command.clone(),
                    translated: Some(command),
                    notice: None,
                }
            }
            Err(e) => {
                e.log();
                warn!("Falling back to literal execution");
                Interpretation {
                    command: raw.to_string(),
                    translated: None,
                    notice: Some(format!("AI interpretation error: {e}")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TermError, TermResult};
    use async_trait::async_trait;

    struct FixedTranslator(String);

    #[async_trait]
    impl Translator for FixedTranslator {
        async fn translate(&self, _text: &str) -> TermResult<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str) -> TermResult<String> {
            Err(TermError::TranslationRequestFailed(
                "connection refused".to_string(),
            ))
        }
    }

    #[test]
    fn test_builtin_verb_set() {
        for verb in ["ls", "dir", "cd", "pwd", "mkdir", "ps", "top", "htop", "clear", "cls", "help"]
        {
            assert!(is_builtin(verb), "{verb} should be built-in");
        }
        assert!(!is_builtin("rm"));
        assert!(!is_builtin(""));
    }

    #[tokio::test]
    async fn test_builtin_passes_through_untranslated() {
        let interpreter = Interpreter::new(Arc::new(FixedTranslator("pwd".to_string())));
        let result = interpreter.resolve("LS -la", true).await;

        assert_eq!(result.command, "LS -la");
        assert!(result.translated.is_none());
        assert!(result.notice.is_none());
    }

    #[tokio::test]
    async fn test_assist_disabled_passes_through() {
        let interpreter = Interpreter::new(Arc::new(FixedTranslator("ls".to_string())));
        let result = interpreter.resolve("show me all files", false).await;

        assert_eq!(result.command, "show me all files");
        assert!(result.translated.is_none());
    }

    #[tokio::test]
    async fn test_natural_language_translated() {
        let interpreter = Interpreter::new(Arc::new(FixedTranslator("  LS \n".to_string())));
        let result = interpreter.resolve("show me all files", true).await;

        assert_eq!(result.command, "ls");
        assert_eq!(result.translated.as_deref(), Some("ls"));
        assert!(result.notice.is_none());
    }

    #[tokio::test]
    async fn test_unknown_reply_falls_back() {
        let interpreter = Interpreter::new(Arc::new(FixedTranslator("unknown".to_string())));
        let result = interpreter.resolve("do something weird", true).await;

        assert_eq!(result.command, "do something weird");
        assert!(result.translated.is_none());
        assert!(result.notice.is_none());
    }

    #[tokio::test]
    async fn test_translation_failure_degrades_gracefully() {
        let interpreter = Interpreter::new(Arc::new(FailingTranslator));
        let result = interpreter.resolve("show me all files", true).await;

        assert_eq!(result.command, "show me all files");
        assert!(result.translated.is_none());
        assert!(result.notice.is_some());
    }

    #[tokio::test]
    async fn test_literal_only_interpreter() {
        let interpreter = Interpreter::literal_only();
        let result = interpreter.resolve("what processes are running", true).await;

        assert_eq!(result.command, "what processes are running");
        assert!(result.notice.is_none());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let interpreter = Interpreter::new(Arc::new(FailingTranslator));
        let result = interpreter.resolve("   ", true).await;
        assert_eq!(result.command, "   ");
        assert!(result.notice.is_none());
    }
}
