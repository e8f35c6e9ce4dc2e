//! Table chat: message model and the view that refreshes and sends it.
use crate::Nanos;
use crate::canister::Principal;
use crate::canister::TableActor;
use crate::error::InputError;
use crate::modal::Modal;
use crate::modal::Mutation;

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub user: Principal,
    pub message: String,
    pub timestamp: Nanos,
}

impl std::fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.user.short(), self.message)
    }
}

/// Recent messages of one table, oldest first, capped at `CHAT_HISTORY`.
#[derive(Debug, Clone)]
pub struct Chat {
    user: Principal,
    messages: Vec<ChatMessage>,
    mutation: Mutation,
}

impl Chat {
    pub fn new(user: Principal, modal: Modal) -> Self {
        Self {
            user,
            messages: Vec::new(),
            mutation: Mutation::new(modal),
        }
    }
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
    pub fn newest(&self) -> Option<Nanos> {
        self.messages.last().map(|m| m.timestamp)
    }

    /// Fetches what arrived since the newest known message and returns
    /// how many were new. The lower bound is inclusive, so messages that
    /// share the newest timestamp come back and are dropped by id. A failed
    /// fetch is logged and keeps the history.
    pub async fn refresh(&mut self, actor: &dyn TableActor) -> usize {
        match actor
            .get_recent_chat_messages(self.newest(), crate::CHAT_PAGE)
            .await
        {
            Ok(incoming) => self.merge(incoming),
            Err(e) => {
                log::warn!("[chat] refresh failed: {}", e);
                0
            }
        }
    }

    fn merge(&mut self, incoming: Vec<ChatMessage>) -> usize {
        let mut known = self
            .messages
            .iter()
            .map(|m| m.id)
            .collect::<std::collections::HashSet<u64>>();
        let fresh = incoming
            .into_iter()
            .filter(|m| known.insert(m.id))
            .collect::<Vec<ChatMessage>>();
        let added = fresh.len();
        self.messages.extend(fresh);
        self.messages.sort_by_key(|m| (m.timestamp, m.id));
        let excess = self.messages.len().saturating_sub(crate::CHAT_HISTORY);
        self.messages.drain(..excess);
        added
    }

    pub async fn send(&self, actor: &dyn TableActor, text: &str) -> Result<bool, InputError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyMessage);
        }
        if text.chars().count() > crate::CHAT_MAX_LEN {
            return Err(InputError::MessageTooLong(crate::CHAT_MAX_LEN));
        }
        let sent = self
            .mutation
            .run("Chat", actor.send_chat_message(&self.user, text.to_string()))
            .await?;
        Ok(sent.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canister::Sandbox;
    use crate::error::TableError;
    use crate::table::GameType;
    use crate::table::fixtures::TableBuilder;

    fn sandbox() -> Sandbox {
        Sandbox::new(
            TableBuilder::new(GameType::NoLimit(1))
                .seat("alice", 0, 100)
                .seat("bob", 0, 100)
                .build(),
        )
    }

    #[tokio::test]
    async fn sends_and_refreshes_incrementally() {
        let sandbox = sandbox();
        let (modal, _notices) = Modal::channel();
        let mut alice = Chat::new(Principal::from("alice"), modal.clone());
        let bob = Chat::new(Principal::from("bob"), modal);
        assert_eq!(alice.send(&sandbox, "  gl hf ").await, Ok(true));
        assert_eq!(bob.send(&sandbox, "ty").await, Ok(true));
        assert_eq!(alice.refresh(&sandbox).await, 2);
        assert_eq!(alice.messages()[0].message, "gl hf");
        assert_eq!(alice.refresh(&sandbox).await, 0);
        assert_eq!(bob.send(&sandbox, "nh").await, Ok(true));
        assert_eq!(alice.refresh(&sandbox).await, 1);
        assert_eq!(alice.messages().len(), 3);
    }

    fn message(id: u64, user: &str, timestamp: Nanos) -> ChatMessage {
        ChatMessage {
            id,
            user: Principal::from(user),
            message: format!("#{}", id),
            timestamp,
        }
    }

    #[test]
    fn keeps_messages_sharing_a_timestamp() {
        let (modal, _notices) = Modal::channel();
        let mut chat = Chat::new(Principal::from("alice"), modal);
        assert_eq!(chat.merge(vec![message(1, "alice", 7)]), 1);
        assert_eq!(chat.newest(), Some(7));
        assert_eq!(chat.merge(vec![message(1, "alice", 7), message(2, "bob", 7)]), 1);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].user, Principal::from("bob"));
    }

    #[test]
    fn history_is_capped() {
        let (modal, _notices) = Modal::channel();
        let mut chat = Chat::new(Principal::from("alice"), modal);
        let flood = (0..crate::CHAT_HISTORY as u64 + 10)
            .map(|i| message(i, "bob", i))
            .collect::<Vec<ChatMessage>>();
        assert_eq!(chat.merge(flood), crate::CHAT_HISTORY + 10);
        assert_eq!(chat.messages().len(), crate::CHAT_HISTORY);
        assert_eq!(chat.messages().first().map(|m| m.id), Some(10));
        assert_eq!(chat.merge(vec![message(999, "bob", 10_000)]), 1);
        assert_eq!(chat.messages().len(), crate::CHAT_HISTORY);
        assert_eq!(chat.messages().last().map(|m| m.id), Some(999));
    }

    #[tokio::test]
    async fn rejects_bad_input() {
        let sandbox = sandbox();
        let (modal, _notices) = Modal::channel();
        let chat = Chat::new(Principal::from("alice"), modal);
        assert_eq!(chat.send(&sandbox, "   ").await, Err(InputError::EmptyMessage));
        let long = "x".repeat(crate::CHAT_MAX_LEN + 1);
        assert_eq!(
            chat.send(&sandbox, &long).await,
            Err(InputError::MessageTooLong(crate::CHAT_MAX_LEN))
        );
        assert_eq!(sandbox.calls(), 0);
    }

    #[tokio::test]
    async fn strangers_are_refused() {
        let sandbox = sandbox();
        let (modal, mut notices) = Modal::channel();
        let chat = Chat::new(Principal::from("mallory"), modal);
        assert_eq!(chat.send(&sandbox, "hi").await, Ok(false));
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.message, TableError::UserNotFound.to_string());
    }
}
