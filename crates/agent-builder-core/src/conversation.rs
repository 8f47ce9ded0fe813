//! Simulated assistant conversation
//!
//! Replies are not generated: each one is looked up from the step that was
//! active when the user sent their message.

use crate::state::{ChatMessage, MessageStore};
use crate::step::WizardStep;

/// Canned assistant reply for the given step
pub fn response_for(step: WizardStep) -> &'static str {
    match step {
        WizardStep::DefineAgent => "Great! I'd like to understand more about this agent. What specific tasks do you want your agent to perform?",
        WizardStep::SpecifyTasks => "Thanks for the details. What industry or domain will this agent be primarily working with? This helps me find the right tools and knowledge sources.",
        WizardStep::SelectDomain => "I've searched for relevant tools in our marketplace. I found these options that might work for your agent. Would you like to configure them now?",
        WizardStep::ConfigureTools => "Perfect! Now we need to build your agent's knowledge base. You can upload documents or point to data sources. What kind of knowledge will your agent need?",
        WizardStep::AddKnowledge => "I've created the prompt templates and workflow for your agent based on your requirements. Your agent is now ready for deployment! Would you like to test it?",
        WizardStep::ReviewDeploy => "Is there anything else you'd like to customize with your agent?",
    }
}

/// Message log plus the exchange currently waiting for a reply
#[derive(Debug, Clone)]
pub struct Conversation {
    store: MessageStore,
    pending: Option<WizardStep>,
}

impl Conversation {
    /// Start a conversation with the assistant greeting
    pub fn new() -> Self {
        Self {
            store: MessageStore::with_messages(vec![ChatMessage::welcome()]),
            pending: None,
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a user turn sent at `step`.
    ///
    /// Blank input and input sent while a reply is still pending are ignored
    /// and return `None`.
    pub fn send(&mut self, text: &str, step: WizardStep) -> Option<&ChatMessage> {
        if text.trim().is_empty() || self.pending.is_some() {
            return None;
        }

        self.store.push(ChatMessage::user(text));
        self.store.begin_loading();
        self.pending = Some(step);
        self.store.last()
    }

    /// Replace the placeholder with the canned reply for `step`.
    ///
    /// Returns `None` if no exchange for that step is pending.
    pub fn complete(&mut self, step: WizardStep) -> Option<&ChatMessage> {
        if self.pending != Some(step) {
            return None;
        }

        self.pending = None;
        self.store
            .resolve_loading(ChatMessage::assistant(response_for(step)));
        self.store.last()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChatRole;

    #[test]
    fn test_responses_distinct_for_first_five_steps() {
        let responses: Vec<&str> = WizardStep::all()
            .into_iter()
            .take(5)
            .map(response_for)
            .collect();
        for (i, a) in responses.iter().enumerate() {
            for b in responses.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_review_step_uses_default_reply() {
        assert_eq!(
            response_for(WizardStep::ReviewDeploy),
            "Is there anything else you'd like to customize with your agent?"
        );
    }

    #[test]
    fn test_starts_with_welcome() {
        let conversation = Conversation::new();
        assert_eq!(conversation.store().len(), 1);
        assert_eq!(conversation.store().messages()[0].id, "welcome");
    }

    #[test]
    fn test_blank_send_is_noop() {
        let mut conversation = Conversation::new();
        assert!(conversation.send("", WizardStep::DefineAgent).is_none());
        assert!(conversation.send("   \t\n", WizardStep::DefineAgent).is_none());
        assert_eq!(conversation.store().len(), 1);
        assert!(!conversation.is_awaiting_reply());
    }

    #[test]
    fn test_send_keeps_text_as_typed() {
        let mut conversation = Conversation::new();
        let sent = conversation.send("  Hello  ", WizardStep::DefineAgent).cloned();
        assert_eq!(sent.map(|m| m.content), Some("  Hello  ".to_string()));
    }

    #[test]
    fn test_send_while_pending_is_noop() {
        let mut conversation = Conversation::new();
        conversation.send("Hello", WizardStep::DefineAgent);
        assert!(conversation.send("again", WizardStep::DefineAgent).is_none());
        assert_eq!(conversation.store().len(), 2);
    }

    #[test]
    fn test_complete_appends_canned_reply() {
        let mut conversation = Conversation::new();
        conversation.send("Hello", WizardStep::DefineAgent);
        let reply = conversation.complete(WizardStep::DefineAgent).cloned().unwrap();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert!(reply
            .content
            .starts_with("Great! I'd like to understand more about this agent."));
        assert_eq!(reply.content, response_for(WizardStep::DefineAgent));
        assert!(!conversation.store().is_loading());
        assert_eq!(conversation.store().len(), 3);
    }

    #[test]
    fn test_complete_without_pending_is_noop() {
        let mut conversation = Conversation::new();
        assert!(conversation.complete(WizardStep::DefineAgent).is_none());
        conversation.send("Hello", WizardStep::DefineAgent);
        assert!(conversation.complete(WizardStep::SpecifyTasks).is_none());
        assert!(conversation.is_awaiting_reply());
    }
}
