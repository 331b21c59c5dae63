//! Scripted support-chat transcript.
//!
//! The transcript persists under its own key so a returning visitor sees the
//! whole conversation. The bot is a keyword script, not a service: the reply
//! is computed synchronously, and the presentation layer is expected to wait
//! [`BOT_REPLY_DELAY`] before calling [`ChatStore::bot_reply`] so the answer
//! appears after a typing pause, mirroring a one-shot timer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use shoplite_core::ChatSender;

use crate::error::Result;
use crate::orders::OrderStore;
use crate::storage::{self, CHAT_KEY, KvStore};

/// Delay the presentation layer should wait before requesting the bot reply.
pub const BOT_REPLY_DELAY: Duration = Duration::from_millis(450);

const GREETING: &str = "Hi! I'm ShopLite Support. How can I help today?";

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent the message.
    pub from: ChatSender,
    /// Message body.
    pub text: String,
}

/// Persistent support-chat transcript with a scripted bot.
#[derive(Clone)]
pub struct ChatStore {
    storage: Arc<dyn KvStore>,
    orders: OrderStore,
}

impl ChatStore {
    /// Create a chat store over the given backend. The bot reads the last
    /// order from the same backend to answer order-status questions.
    #[must_use]
    pub fn new(storage: Arc<dyn KvStore>) -> Self {
        let orders = OrderStore::new(storage.clone());
        Self { storage, orders }
    }

    /// The stored conversation, seeding the canned greeting on first read.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn transcript(&self) -> Result<Vec<ChatMessage>> {
        let mut messages: Vec<ChatMessage> =
            storage::read_or_default(self.storage.as_ref(), CHAT_KEY)?;
        if messages.is_empty() {
            messages.push(ChatMessage {
                from: ChatSender::Bot,
                text: GREETING.to_owned(),
            });
            storage::write_doc(self.storage.as_ref(), CHAT_KEY, &messages)?;
        }
        Ok(messages)
    }

    /// Append a user message to the transcript. Blank or whitespace-only
    /// input is ignored and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn send(&self, text: &str) -> Result<Option<ChatMessage>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let mut messages = self.transcript()?;
        let message = ChatMessage {
            from: ChatSender::User,
            text: text.to_owned(),
        };
        messages.push(message.clone());
        storage::write_doc(self.storage.as_ref(), CHAT_KEY, &messages)?;
        debug!(len = messages.len(), "user message appended");
        Ok(Some(message))
    }

    /// Compute the scripted reply to the latest user message, append it to
    /// the transcript, and return it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn bot_reply(&self) -> Result<ChatMessage> {
        let mut messages = self.transcript()?;
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.from == ChatSender::User)
            .map(|m| m.text.clone())
            .unwrap_or_default();

        let reply = ChatMessage {
            from: ChatSender::Bot,
            text: self.scripted_reply(&last_user)?,
        };
        messages.push(reply.clone());
        storage::write_doc(self.storage.as_ref(), CHAT_KEY, &messages)?;
        Ok(reply)
    }

    fn scripted_reply(&self, text: &str) -> Result<String> {
        let lowered = text.to_lowercase();
        if lowered.contains("order") {
            return Ok(match self.orders.last_order()? {
                Some(order) => format!(
                    "Your latest order is {} and it's currently \"{}\". \
                     You can also track it on the Orders page.",
                    order.id, order.status
                ),
                None => "I don't see a recent order. Try completing checkout, \
                         then track it on the Orders page."
                    .to_owned(),
            });
        }
        if lowered.contains("refund") {
            return Ok(
                "For this demo, refunds are not processed — but in a real site \
                 this would open a return flow."
                    .to_owned(),
            );
        }
        Ok(
            "Thanks! In a real store, I'd open a support ticket. For now, try \
             browsing the Shop or checking your Cart."
                .to_owned(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use crate::catalog::Catalog;
    use crate::storage::MemoryKv;
    use shoplite_core::ProductId;

    fn chat() -> ChatStore {
        ChatStore::new(Arc::new(MemoryKv::new()))
    }

    #[test]
    fn test_greeting_is_seeded_exactly_once() {
        let chat = chat();
        let first = chat.transcript().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].from, ChatSender::Bot);
        assert_eq!(first[0].text, GREETING);

        let second = chat.transcript().unwrap();
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_send_appends_trimmed_user_message() {
        let chat = chat();
        let message = chat.send("  where is my stuff  ").unwrap().unwrap();
        assert_eq!(message.from, ChatSender::User);
        assert_eq!(message.text, "where is my stuff");

        let transcript = chat.transcript().unwrap();
        assert_eq!(transcript.len(), 2); // greeting + user message
    }

    #[test]
    fn test_send_blank_is_a_noop() {
        let chat = chat();
        assert!(chat.send("").unwrap().is_none());
        assert!(chat.send("   ").unwrap().is_none());
        assert_eq!(chat.transcript().unwrap().len(), 1); // greeting only
    }

    #[test]
    fn test_order_question_without_order() {
        let chat = chat();
        chat.send("What about my order?").unwrap();
        let reply = chat.bot_reply().unwrap();
        assert_eq!(reply.from, ChatSender::Bot);
        assert!(reply.text.contains("don't see a recent order"));
    }

    #[test]
    fn test_order_question_mentions_last_order() {
        let backend: Arc<MemoryKv> = Arc::new(MemoryKv::new());
        let cart = CartStore::new(backend.clone(), Arc::new(Catalog::default()));
        let orders = OrderStore::new(backend.clone());
        cart.add_item(&ProductId::new("p1"), 1).unwrap();
        let order = orders.checkout(&cart).unwrap();

        let chat = ChatStore::new(backend);
        chat.send("order status please").unwrap();
        let reply = chat.bot_reply().unwrap();
        assert!(reply.text.contains(order.id.as_str()));
        assert!(reply.text.contains("Processing"));
    }

    #[test]
    fn test_refund_and_fallback_replies() {
        let chat = chat();
        chat.send("Can I get a refund?").unwrap();
        assert!(chat.bot_reply().unwrap().text.contains("refunds"));

        chat.send("hello there").unwrap();
        assert!(chat.bot_reply().unwrap().text.contains("support ticket"));
    }

    #[test]
    fn test_reply_is_persisted_in_transcript() {
        let chat = chat();
        chat.send("hello").unwrap();
        let reply = chat.bot_reply().unwrap();
        let transcript = chat.transcript().unwrap();
        assert_eq!(transcript.last().unwrap(), &reply);
        assert_eq!(transcript.len(), 3); // greeting, user, bot
    }
}
