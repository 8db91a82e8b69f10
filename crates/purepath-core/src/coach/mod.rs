//! AI recovery coach.
//!
//! The core never calls the generative-AI service on its own. The CLI hands
//! a [`CoachClient`] to a [`Conversation`] or to [`load_article`], and the
//! client absorbs every failure by returning fixed fallback text.

mod conversation;
pub mod credentials;
mod gemini;

pub use conversation::Conversation;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indoc::formatdoc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::content::library::LibraryTopic;
use crate::error::Result;
use crate::storage::StatsStore;

pub const SYSTEM_INSTRUCTION: &str = "You are a compassionate, knowledgeable, and stoic recovery coach. Your goal is to help the user overcome addiction (specifically pornography addiction) using science-based tools (neuroscience) and stoic philosophy. Be concise, encouraging, and direct. Do not be preachy. Focus on actionable advice.";

pub const WELCOME_MESSAGE: &str = "Hi there. I'm your recovery coach. I'm here to listen without judgment. How are you feeling today?";

/// Reply when the service answered with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm listening. Please continue.";
/// Reply when the service could not be reached.
pub const CHAT_FAILURE_FALLBACK: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";
/// Article body when the service answered with no text.
pub const EMPTY_ARTICLE_FALLBACK: &str = "Content currently unavailable.";
/// Article body when the service could not be reached.
pub const ARTICLE_FAILURE_FALLBACK: &str = "Failed to load content. Please check your connection.";

/// Prompt for a library article about `topic_title`.
pub fn article_prompt(topic_title: &str) -> String {
    formatdoc!(
        r#"
            Write a comprehensive, easy-to-understand guide about "{}" in the context of dopamine addiction and recovery.

            Structure the response with Markdown:
            - Use a clear H2 title.
            - Provide a "Summary" section.
            - Explain the "Mechanism" (how it works in the brain).
            - Provide "Actionable Steps" or strategies.

            Keep the tone scientific but accessible. Limit to roughly 300 words."#,
        topic_title
    )
}

/// True for the fixed strings a client substitutes on failure.
pub fn is_fallback(text: &str) -> bool {
    [
        EMPTY_REPLY_FALLBACK,
        CHAT_FAILURE_FALLBACK,
        EMPTY_ARTICLE_FALLBACK,
        ARTICLE_FAILURE_FALLBACK,
    ]
    .contains(&text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp,
        }
    }
}

/// A generative-AI backend for the coach.
///
/// Implementations never fail: on any error they log it and return one of
/// the fallback constants in this module.
#[async_trait]
pub trait CoachClient: Send + Sync {
    /// Reply to the last message of an ordered conversation.
    async fn send_message(&self, history: &[ChatMessage]) -> String;

    /// Markdown article explaining `topic_title`.
    async fn library_content(&self, topic_title: &str) -> String;
}

/// Return the cached article for `topic`, generating and caching it on a miss.
///
/// Fallback text is returned but never cached, so the next request retries.
///
/// # Errors
/// Returns an error only if the kv store read or write fails.
pub async fn load_article<C>(store: &StatsStore<'_>, client: &C, topic: LibraryTopic) -> Result<String>
where
    C: CoachClient + ?Sized,
{
    if let Some(text) = store.cached_article(topic.id)? {
        debug!(topic = topic.id, "library article served from cache");
        return Ok(text);
    }
    let text = client.library_content(topic.title).await;
    if !is_fallback(&text) {
        store.cache_article(topic.id, &text)?;
    }
    Ok(text)
}
