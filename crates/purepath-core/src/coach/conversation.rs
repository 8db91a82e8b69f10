use chrono::{DateTime, Utc};
use tracing::debug;

use super::{ChatMessage, ChatRole, CoachClient, WELCOME_MESSAGE};
use crate::error::SendRejected;

/// An in-memory chat with the coach.
///
/// At most one reply is outstanding at a time; the model's reply to a
/// message is always appended directly after it.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Conversation {
    /// A conversation seeded with the coach's greeting.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Model, WELCOME_MESSAGE, now)],
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append the user's message and return the history to send.
    ///
    /// # Errors
    /// Rejects blank text, or any text while a reply is still pending.
    pub fn begin_turn(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<&[ChatMessage], SendRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendRejected::EmptyMessage);
        }
        if self.pending {
            return Err(SendRejected::ReplyPending);
        }
        self.messages
            .push(ChatMessage::new(ChatRole::User, text, now));
        self.pending = true;
        Ok(&self.messages)
    }

    /// Append the model's reply and accept new input again.
    pub fn finish_turn(&mut self, reply: String, now: DateTime<Utc>) -> &ChatMessage {
        self.messages
            .push(ChatMessage::new(ChatRole::Model, reply, now));
        self.pending = false;
        &self.messages[self.messages.len() - 1]
    }

    /// Send one message and wait for the reply.
    ///
    /// If the returned future is dropped before the reply arrives, the
    /// unanswered message is removed and the conversation accepts input again.
    ///
    /// # Errors
    /// See [`Conversation::begin_turn`]. Service failures surface as
    /// fallback reply text, not as errors.
    pub async fn send<C>(&mut self, client: &C, text: &str) -> Result<&ChatMessage, SendRejected>
    where
        C: CoachClient + ?Sized,
    {
        self.begin_turn(text, Utc::now())?;
        {
            let mut turn = OpenTurn { chat: &mut *self };
            let reply = client.send_message(&turn.chat.messages).await;
            turn.chat.finish_turn(reply, Utc::now());
        }
        Ok(&self.messages[self.messages.len() - 1])
    }
}

/// Rolls back a turn that never got its reply.
struct OpenTurn<'a> {
    chat: &'a mut Conversation,
}

impl Drop for OpenTurn<'_> {
    fn drop(&mut self) {
        if self.chat.pending {
            debug!("reply abandoned, dropping unanswered message");
            self.chat.messages.pop();
            self.chat.pending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::tests::ScriptedCoach;
    use crate::coach::CHAT_FAILURE_FALLBACK;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn starts_with_welcome() {
        let chat = Conversation::new(t0());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, ChatRole::Model);
        assert_eq!(chat.messages()[0].text, WELCOME_MESSAGE);
        assert!(!chat.is_pending());
    }

    #[test]
    fn blank_messages_are_rejected() {
        let mut chat = Conversation::new(t0());
        assert_eq!(chat.begin_turn("   ", t0()).unwrap_err(), SendRejected::EmptyMessage);
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn second_message_waits_for_reply() {
        let mut chat = Conversation::new(t0());
        chat.begin_turn("I feel an urge", t0()).unwrap();
        assert_eq!(
            chat.begin_turn("hello?", t0()).unwrap_err(),
            SendRejected::ReplyPending
        );
        chat.finish_turn("Breathe first.".into(), t0());
        assert!(chat.begin_turn("ok", t0()).is_ok());
    }

    #[tokio::test]
    async fn send_appends_user_then_model() {
        let coach = ScriptedCoach::new("Go for a walk.");
        let mut chat = Conversation::new(t0());
        let reply = chat.send(&coach, " I'm bored ").await.unwrap();
        assert_eq!(reply.text, "Go for a walk.");

        let roles: Vec<_> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Model, ChatRole::User, ChatRole::Model]);
        assert_eq!(chat.messages()[1].text, "I'm bored");
        assert!(!chat.is_pending());
    }

    #[tokio::test]
    async fn fallback_reply_is_still_appended() {
        let coach = ScriptedCoach::new(CHAT_FAILURE_FALLBACK);
        let mut chat = Conversation::new(t0());
        chat.send(&coach, "hi").await.unwrap();
        assert_eq!(chat.messages().last().unwrap().text, CHAT_FAILURE_FALLBACK);
    }

    /// Never replies.
    struct SilentCoach;

    #[async_trait]
    impl CoachClient for SilentCoach {
        async fn send_message(&self, _history: &[ChatMessage]) -> String {
            std::future::pending().await
        }

        async fn library_content(&self, _topic_title: &str) -> String {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn cancelled_send_rolls_back_turn() {
        let mut chat = Conversation::new(t0());
        tokio::select! {
            biased;
            _ = chat.send(&SilentCoach, "are you there?") => panic!("silent coach replied"),
            () = std::future::ready(()) => {}
        }

        assert!(!chat.is_pending());
        assert_eq!(chat.messages().len(), 1);

        let coach = ScriptedCoach::new("Yes.");
        assert_eq!(chat.send(&coach, "hello").await.unwrap().text, "Yes.");
        assert_eq!(chat.messages().len(), 3);
    }
}
