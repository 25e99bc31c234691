//! The translation collaborator: a hosted language model mapping free text
//! to one of the built-in verbs, or the literal token `unknown`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{TermError, TermResult};
use crate::interpreter::BUILTIN_VERBS;

const GOOGLE_AI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Best-effort natural-language-to-command translation. One network call,
/// no retry; callers treat every error as a non-fatal degradation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns the model's raw reply text for the given user input.
    async fn translate(&self, text: &str) -> TermResult<String>;
}

/// Translator backed by the Gemini generateContent API.
pub struct GeminiTranslator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiTranslator {
    pub fn new(model: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            api_key: std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .ok(),
            model: model.into(),
            base_url: GOOGLE_AI_API_BASE.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "Convert this natural language request into a terminal command.\n\
             Available commands: {}\n\
             User request: \"{}\"\n\
             Respond with just the command, nothing else. \
             If you can't convert it, respond with \"unknown\".",
            BUILTIN_VERBS.join(", "),
            text
        )
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, text: &str) -> TermResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TermError::TranslationKeyMissing)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(text),
                }],
            }],
        };

        debug!(model = %self.model, "Requesting command translation");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TermError::TranslationTimeout(self.timeout.as_secs())
                } else {
                    TermError::TranslationRequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Translation API returned error status");
            return Err(TermError::TranslationRequestFailed(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TermError::TranslationParseError(e.to_string()))?;

        let reply = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                TermError::TranslationParseError("Response contained no candidates".to_string())
            })?;

        Ok(reply)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gemini_reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[test]
    fn test_prompt_embeds_text_and_verbs() {
        let prompt = GeminiTranslator::build_prompt("show me all files");
        assert!(prompt.contains("show me all files"));
        assert!(prompt.contains("ls"));
        assert!(prompt.contains("mkdir"));
        assert!(prompt.contains("unknown"));
    }

    #[tokio::test]
    async fn test_translate_without_api_key() {
        let translator = GeminiTranslator {
            client: Client::new(),
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: GOOGLE_AI_API_BASE.to_string(),
            timeout: Duration::from_secs(1),
        };

        let err = translator.translate("list files").await.unwrap_err();
        assert!(matches!(err, TermError::TranslationKeyMissing));
    }

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("ls")))
            .mount(&server)
            .await;

        let translator = GeminiTranslator::new("gemini-2.0-flash", 5)
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let reply = translator.translate("show me all files").await.unwrap();
        assert_eq!(reply, "ls");
    }

    #[tokio::test]
    async fn test_translate_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let translator = GeminiTranslator::new("gemini-2.0-flash", 5)
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let err = translator.translate("list files").await.unwrap_err();
        assert!(matches!(err, TermError::TranslationRequestFailed(_)));
    }

    #[tokio::test]
    async fn test_translate_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let translator = GeminiTranslator::new("gemini-2.0-flash", 5)
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let err = translator.translate("list files").await.unwrap_err();
        assert!(matches!(err, TermError::TranslationParseError(_)));
    }

    #[tokio::test]
    async fn test_translate_empty_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let translator = GeminiTranslator::new("gemini-2.0-flash", 5)
            .with_api_key("test-key")
            .with_base_url(server.uri());

        let err = translator.translate("list files").await.unwrap_err();
        assert!(matches!(err, TermError::TranslationParseError(_)));
    }
}
