//! Typing reconciliation.
//!
//! Folds the stream of per-user ephemeral updates into at most one live
//! preview per username, and retires previews when the user stops or commits.

use std::collections::HashMap;

use relaychat_proto::{ChatMessage, TypingUpdate};

use crate::{Identity, RenderCommand};

/// Live preview for one remote typist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingEntry {
    /// Remote typist.
    pub username: String,
    /// Most recent draft text. Never blank.
    pub last_text: String,
}

/// Typing reconciliation engine.
///
/// # Invariants
///
/// - At most one entry per username (map key).
/// - Every stored `last_text` has non-whitespace content.
/// - Retiring an absent entry is a no-op and emits nothing.
#[derive(Debug, Clone, Default)]
pub struct TypingEngine {
    entries: HashMap<String, TypingEntry>,
}

impl TypingEngine {
    /// Create an engine with no previews.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `typing` event.
    ///
    /// Echoes of the local client's own typing are dropped. Blank text retires
    /// the sender's preview; anything else creates or updates it.
    pub fn on_typing(&mut self, update: TypingUpdate, identity: &Identity) -> Vec<RenderCommand> {
        if identity.is_self(update.client_id.as_deref()) {
            tracing::trace!(username = %update.username, "ignoring own typing echo");
            return vec![];
        }

        if update.text.trim().is_empty() {
            return self.retire(&update.username);
        }

        let TypingUpdate { username, text, .. } = update;
        let entry = self
            .entries
            .entry(username.clone())
            .or_insert_with(|| TypingEntry { username: username.clone(), last_text: String::new() });
        entry.last_text.clone_from(&text);

        vec![RenderCommand::UpsertTypingPreview { username, text }]
    }

    /// Apply a `user_stopped_typing` event.
    pub fn on_stop_typing(&mut self, username: &str) -> Vec<RenderCommand> {
        self.retire(username)
    }

    /// Apply a final `message`.
    ///
    /// The message is appended first, then the sender's preview is retired.
    /// Final messages are never filtered by identity.
    pub fn on_final_message(&mut self, message: ChatMessage) -> Vec<RenderCommand> {
        let ChatMessage { username, text, timestamp } = message;
        let mut commands = self.retire(&username);
        commands.insert(0, RenderCommand::AppendFinalMessage { username, text, timestamp });
        commands
    }

    /// Preview for `username`, if one is live.
    pub fn entry(&self, username: &str) -> Option<&TypingEntry> {
        self.entries.get(username)
    }

    /// All live previews, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &TypingEntry> {
        self.entries.values()
    }

    /// Number of live previews.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no previews are live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn retire(&mut self, username: &str) -> Vec<RenderCommand> {
        match self.entries.remove(username) {
            Some(entry) => vec![RenderCommand::RemoveTypingPreview { username: entry.username }],
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use relaychat_proto::Timestamp;

    use super::*;

    fn typing(username: &str, text: &str, client_id: Option<&str>) -> TypingUpdate {
        TypingUpdate {
            username: username.into(),
            text: text.into(),
            client_id: client_id.map(Into::into),
        }
    }

    fn message(username: &str, text: &str, millis: u64) -> ChatMessage {
        ChatMessage {
            username: username.into(),
            text: text.into(),
            timestamp: Timestamp::from_millis(millis),
        }
    }

    #[test]
    fn updates_replace_content() {
        let mut engine = TypingEngine::new();
        let identity = Identity::new();

        engine.on_typing(typing("bob", "h", Some("c2")), &identity);
        let commands = engine.on_typing(typing("bob", "hi", Some("c2")), &identity);

        assert_eq!(commands, vec![RenderCommand::UpsertTypingPreview {
            username: "bob".into(),
            text: "hi".into(),
        }]);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.entry("bob").map(|e| e.last_text.as_str()), Some("hi"));
    }

    #[test]
    fn whitespace_text_retires_entry() {
        let mut engine = TypingEngine::new();
        let identity = Identity::new();

        engine.on_typing(typing("bob", "hi", None), &identity);
        let commands = engine.on_typing(typing("bob", "  \n", None), &identity);

        assert_eq!(commands, vec![RenderCommand::RemoveTypingPreview { username: "bob".into() }]);
        assert!(engine.is_empty());

        // Second blank update has nothing to retire
        assert!(engine.on_typing(typing("bob", "", None), &identity).is_empty());
    }

    #[test]
    fn stop_typing_is_idempotent() {
        let mut engine = TypingEngine::new();
        let identity = Identity::new();

        assert!(engine.on_stop_typing("carol").is_empty());

        engine.on_typing(typing("carol", "draft", None), &identity);
        assert_eq!(engine.on_stop_typing("carol").len(), 1);
        assert!(engine.on_stop_typing("carol").is_empty());
    }

    #[test]
    fn own_echo_is_filtered() {
        let mut engine = TypingEngine::new();
        let mut identity = Identity::new();
        identity.observe_welcome("c1".into());

        let commands = engine.on_typing(typing("me", "secret draft", Some("c1")), &identity);
        assert!(commands.is_empty());
        assert!(engine.is_empty());
    }

    #[test]
    fn final_message_appends_then_retires() {
        let mut engine = TypingEngine::new();
        let identity = Identity::new();

        engine.on_typing(typing("bob", "hello al", None), &identity);
        let commands = engine.on_final_message(message("bob", "hello all", 1000));

        assert_eq!(commands, vec![
            RenderCommand::AppendFinalMessage {
                username: "bob".into(),
                text: "hello all".into(),
                timestamp: Timestamp::from_millis(1000),
            },
            RenderCommand::RemoveTypingPreview { username: "bob".into() },
        ]);
        assert!(engine.is_empty());
    }

    #[test]
    fn final_message_without_preview_only_appends() {
        let mut engine = TypingEngine::new();
        let commands = engine.on_final_message(message("dave", "hey", 5));

        assert!(matches!(commands.as_slice(), [RenderCommand::AppendFinalMessage { .. }]));
    }

    #[test]
    fn other_users_are_unaffected() {
        let mut engine = TypingEngine::new();
        let identity = Identity::new();

        engine.on_typing(typing("bob", "one", None), &identity);
        engine.on_typing(typing("eve", "two", None), &identity);
        engine.on_final_message(message("bob", "one!", 1));

        assert!(engine.entry("bob").is_none());
        assert_eq!(engine.entry("eve").map(|e| e.last_text.as_str()), Some("two"));
    }
}
