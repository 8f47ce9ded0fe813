//! UI-agnostic chat state
//!
//! Message types and the append-only store that holds one wizard session's
//! conversation. Nothing here depends on a rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the greeting that opens every session
pub const WELCOME_ID: &str = "welcome";

/// Id used by the transient "thinking" placeholder
pub const LOADING_ID: &str = "loading";

pub const WELCOME_MESSAGE: &str = "Hi there! I'm your AI Agent Builder. Tell me about the AI agent you want to create, and I'll guide you through the process.";

/// A chat message in the wizard conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: ChatRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Loading,
    Complete,
    Error,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            status: None,
            timestamp: Some(Utc::now()),
        }
    }

    pub fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            ..Self::assistant(WELCOME_MESSAGE)
        }
    }

    /// Empty assistant turn shown while a reply is pending
    pub fn loading() -> Self {
        Self {
            id: LOADING_ID.to_string(),
            content: String::new(),
            role: ChatRole::Assistant,
            status: Some(MessageStatus::Loading),
            timestamp: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == Some(MessageStatus::Loading)
    }
}

/// Ordered chat turns for one session.
///
/// Committed messages are never removed or edited. The loading placeholder is
/// kept apart from them so that `len()` only ever grows.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
    loading: Option<ChatMessage>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            loading: None,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn begin_loading(&mut self) {
        self.loading = Some(ChatMessage::loading());
    }

    /// Drop the placeholder and commit the real reply in its place
    pub fn resolve_loading(&mut self, reply: ChatMessage) {
        self.loading = None;
        self.messages.push(reply);
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Committed messages followed by the placeholder, if any
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().chain(self.loading.iter())
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_placeholder_not_counted() {
        let mut store = MessageStore::new();
        store.push(ChatMessage::user("hi"));
        store.begin_loading();

        assert_eq!(store.len(), 1);
        assert_eq!(store.visible().count(), 2);
        assert!(store.visible().last().is_some_and(|m| m.is_loading()));
    }

    #[test]
    fn test_resolve_loading_replaces_placeholder() {
        let mut store = MessageStore::new();
        store.push(ChatMessage::user("hi"));
        store.begin_loading();
        store.resolve_loading(ChatMessage::assistant("hello"));

        assert!(!store.is_loading());
        assert_eq!(store.len(), 2);
        assert!(store.visible().all(|m| !m.is_loading()));
        assert_eq!(store.last().map(|m| m.content.as_str()), Some("hello"));
    }

    #[test]
    fn test_message_ids_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("a");
        assert_ne!(a.id, b.id);
        assert!(a.timestamp.is_some());
    }

    #[test]
    fn test_welcome_message() {
        let welcome = ChatMessage::welcome();
        assert_eq!(welcome.id, WELCOME_ID);
        assert_eq!(welcome.role, ChatRole::Assistant);
        assert_eq!(welcome.content, WELCOME_MESSAGE);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
