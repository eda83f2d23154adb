//! Client for the Gemini `generateContent` endpoint, used as the comment
//! sentiment classifier.

use async_trait::async_trait;
use domain::Comment;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

mod prompt;

pub use prompt::sentiment_prompt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("prompt was blocked: {0}")]
    Blocked(String),

    #[error("Gemini returned no candidates")]
    EmptyReply,

    #[error("Gemini request timed out")]
    Timeout,

    #[error("http error: {0}")]
    Http(reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Labels comments with free text the caller must reconcile
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, comments: &[Comment]) -> Result<String, ClassifierError>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated
    fn into_text(self) -> Result<String, ClassifierError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ClassifierError::Blocked(reason));
        }

        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or(ClassifierError::EmptyReply)?;

        Ok(content.parts.into_iter().filter_map(|p| p.text).collect())
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| ClassifierError::Config("invalid API key format".to_string()))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClassifierError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send a single-turn prompt and return the reply text
    pub async fn generate(&self, prompt: &str) -> Result<String, ClassifierError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = self.generate_url();
        debug!(%url, prompt_chars = prompt.len(), "requesting Gemini completion");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.into_text()
    }
}

#[async_trait]
impl SentimentClassifier for GeminiClient {
    async fn classify(&self, comments: &[Comment]) -> Result<String, ClassifierError> {
        let reply = self.generate(&sentiment_prompt(comments)).await?;
        debug!(comments = comments.len(), reply_chars = reply.len(), "classifier replied");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_gemini_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn reply_joins_text_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "[\"Positive\","}, {"text": " \"Neutral\"]"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), r#"["Positive", "Neutral"]"#);
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(ClassifierError::Blocked(reason)) if reason == "SAFETY"
        ));
    }

    #[test]
    fn no_candidates_is_empty_reply() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(response.into_text(), Err(ClassifierError::EmptyReply)));
    }
}
