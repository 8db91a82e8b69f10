//! REST client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use super::credentials;
use super::{
    article_prompt, ChatMessage, ChatRole, CoachClient, ARTICLE_FAILURE_FALLBACK,
    CHAT_FAILURE_FALLBACK, EMPTY_ARTICLE_FALLBACK, EMPTY_REPLY_FALLBACK, SYSTEM_INSTRUCTION,
};
use crate::error::CoachError;
use crate::storage::CoachConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn text(role: Option<&'static str>, text: &'a str) -> Self {
        Self {
            role,
            parts: [Part { text }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// `{api_base}/v1beta/models/{model}:generateContent`, keeping any path
/// prefix already on `api_base`.
fn endpoint_url(api_base: &str, model: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(api_base)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["v1beta", "models", format!("{model}:generateContent").as_str()]);
    Ok(url)
}

pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    /// # Errors
    /// Returns an error if the HTTP client or the endpoint URL cannot be built.
    pub fn new(config: &CoachConfig, api_key: impl Into<String>) -> Result<Self, CoachError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;
        let endpoint = endpoint_url(&config.api_base, &config.model)?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// Build a client with the key from the environment or the keyring.
    ///
    /// # Errors
    /// Returns [`CoachError::MissingApiKey`] when no key is configured.
    pub fn from_config(config: &CoachConfig) -> Result<Self, CoachError> {
        let api_key = credentials::resolve_api_key(&config.api_key_env).ok_or_else(|| {
            CoachError::MissingApiKey {
                env_var: config.api_key_env.clone(),
            }
        })?;
        Self::new(config, api_key)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, CoachError> {
        debug!(endpoint = %self.endpoint, turns = request.contents.len(), "generateContent");
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoachError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed.text().ok_or(CoachError::EmptyResponse)
    }

    /// Raw chat turn: the model's reply to `history`.
    ///
    /// # Errors
    /// Returns any transport, status or empty-response failure.
    pub async fn chat(&self, history: &[ChatMessage]) -> Result<String, CoachError> {
        let contents = history
            .iter()
            .map(|m| Content::text(Some(m.role.as_str()), &m.text))
            .collect();
        let request = GenerateRequest {
            system_instruction: Some(Content::text(None, SYSTEM_INSTRUCTION)),
            contents,
        };
        self.generate(&request).await
    }

    /// Raw article generation for `topic_title`.
    ///
    /// # Errors
    /// Returns any transport, status or empty-response failure.
    pub async fn article(&self, topic_title: &str) -> Result<String, CoachError> {
        let prompt = article_prompt(topic_title);
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content::text(Some(ChatRole::User.as_str()), &prompt)],
        };
        self.generate(&request).await
    }
}

#[async_trait]
impl CoachClient for GeminiClient {
    async fn send_message(&self, history: &[ChatMessage]) -> String {
        match self.chat(history).await {
            Ok(text) => text,
            Err(CoachError::EmptyResponse) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(e) => {
                error!(error = %e, "coach request failed");
                CHAT_FAILURE_FALLBACK.to_string()
            }
        }
    }

    async fn library_content(&self, topic_title: &str) -> String {
        match self.article(topic_title).await {
            Ok(text) => text,
            Err(CoachError::EmptyResponse) => EMPTY_ARTICLE_FALLBACK.to_string(),
            Err(e) => {
                error!(error = %e, topic = topic_title, "library request failed");
                ARTICLE_FAILURE_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::WELCOME_MESSAGE;
    use chrono::Utc;
    use mockito::Matcher;

    const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn config(base: &str) -> CoachConfig {
        CoachConfig {
            api_base: base.to_string(),
            request_timeout_secs: 5,
            ..CoachConfig::default()
        }
    }

    fn reply_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(&CoachConfig::default(), "k").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        for base in ["https://proxy.example.com/gemini", "https://proxy.example.com/gemini/"] {
            let client = GeminiClient::new(&config(base), "k").unwrap();
            assert_eq!(
                client.endpoint().path(),
                "/gemini/v1beta/models/gemini-2.5-flash:generateContent"
            );
        }
    }

    #[test]
    fn opaque_base_is_rejected() {
        let err = GeminiClient::new(&config("mailto:coach@example.com"), "k").err().unwrap();
        assert!(matches!(err, CoachError::InvalidUrl(_)));
    }

    #[test]
    fn missing_key_is_reported() {
        let cfg = CoachConfig {
            api_key_env: "PUREPATH_TEST_UNSET_KEY".into(),
            ..CoachConfig::default()
        };
        std::env::remove_var("PUREPATH_TEST_UNSET_KEY");
        // A developer keyring may hold a real key; only assert the error shape.
        if let Err(e) = GeminiClient::from_config(&cfg) {
            assert!(matches!(e, CoachError::MissingApiKey { .. }));
            assert!(e.to_string().contains("PUREPATH_TEST_UNSET_KEY"));
        }
    }

    #[tokio::test]
    async fn chat_sends_history_and_system_instruction() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "secret")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
                "contents": [
                    { "role": "model", "parts": [{ "text": WELCOME_MESSAGE }] },
                    { "role": "user", "parts": [{ "text": "I slipped yesterday" }] }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("Start again today."))
            .create_async()
            .await;

        let client = GeminiClient::new(&config(&server.url()), "secret").unwrap();
        let history = vec![
            ChatMessage::new(ChatRole::Model, WELCOME_MESSAGE, Utc::now()),
            ChatMessage::new(ChatRole::User, "I slipped yesterday", Utc::now()),
        ];
        assert_eq!(client.send_message(&history).await, "Start again today.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_candidates_give_listening_reply() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config(&server.url()), "k").unwrap();
        assert_eq!(client.send_message(&[]).await, EMPTY_REPLY_FALLBACK);
        assert_eq!(client.library_content("Triggers").await, EMPTY_ARTICLE_FALLBACK);
    }

    #[tokio::test]
    async fn server_error_gives_connection_fallbacks() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(500)
            .with_body("boom")
            .expect_at_least(1)
            .create_async()
            .await;

        let client = GeminiClient::new(&config(&server.url()), "k").unwrap();
        match client.chat(&[]).await {
            Err(CoachError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(client.send_message(&[]).await, CHAT_FAILURE_FALLBACK);
        assert_eq!(client.library_content("Triggers").await, ARTICLE_FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn article_prompt_is_sent_as_user_turn() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::Regex("The Chaser Effect".into()))
            .with_status(200)
            .with_body(reply_body("## The Chaser Effect"))
            .create_async()
            .await;

        let client = GeminiClient::new(&config(&server.url()), "k").unwrap();
        assert_eq!(client.library_content("The Chaser Effect").await, "## The Chaser Effect");
        mock.assert_async().await;
    }
}
