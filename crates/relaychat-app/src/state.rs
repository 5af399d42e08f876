//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of the conversation, such as [`ConversationLog`] and
//! [`ConnectionState`].
//!
//! These structures serve as the "View Model" for the application. They hold
//! exactly what a renderer needs and nothing of the wire protocol.

use relaychat_core::{RenderCommand, Timestamp};

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected. A reconnect may be pending.
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Connection open.
    Connected,
}

/// One line of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Client-generated notice.
    Notice {
        /// Notice text.
        text: String,
    },
    /// Committed message.
    Message {
        /// Sender display name.
        username: String,
        /// Message body.
        text: String,
        /// Sender clock, milliseconds since the Unix epoch.
        timestamp: Timestamp,
    },
    /// Live typing preview for a remote user.
    Typing {
        /// Remote typist.
        username: String,
        /// Latest draft text.
        text: String,
    },
}

/// Append-only conversation log with in-place typing previews.
///
/// A preview keeps its position from creation until it is retired. Updates
/// rewrite its text without moving it; finals and notices append after it.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<LogEntry>,
}

impl ConversationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a render command.
    pub fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::SystemNotice { text } => self.entries.push(LogEntry::Notice { text }),
            RenderCommand::UpsertTypingPreview { username, text } => {
                match self.preview_index(&username) {
                    Some(index) => {
                        if let Some(LogEntry::Typing { text: current, .. }) =
                            self.entries.get_mut(index)
                        {
                            *current = text;
                        }
                    },
                    None => self.entries.push(LogEntry::Typing { username, text }),
                }
            },
            RenderCommand::RemoveTypingPreview { username } => {
                if let Some(index) = self.preview_index(&username) {
                    self.entries.remove(index);
                }
            },
            RenderCommand::AppendFinalMessage { username, text, timestamp } => {
                self.entries.push(LogEntry::Message { username, text, timestamp });
            },
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live preview text for `username`.
    pub fn preview(&self, username: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            LogEntry::Typing { username: u, text } if u == username => Some(text.as_str()),
            _ => None,
        })
    }

    fn preview_index(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| matches!(entry, LogEntry::Typing { username: u, .. } if u == username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(username: &str, text: &str) -> RenderCommand {
        RenderCommand::UpsertTypingPreview { username: username.into(), text: text.into() }
    }

    #[test]
    fn preview_updates_in_place() {
        let mut log = ConversationLog::new();
        log.apply(upsert("bob", "h"));
        log.apply(RenderCommand::SystemNotice { text: "note".into() });
        log.apply(upsert("bob", "hi"));

        assert_eq!(log.entries(), &[
            LogEntry::Typing { username: "bob".into(), text: "hi".into() },
            LogEntry::Notice { text: "note".into() },
        ]);
    }

    #[test]
    fn final_appends_after_preview_then_preview_retires() {
        let mut log = ConversationLog::new();
        log.apply(upsert("bob", "hello al"));
        log.apply(RenderCommand::AppendFinalMessage {
            username: "bob".into(),
            text: "hello all".into(),
            timestamp: Timestamp::from_millis(1),
        });
        log.apply(RenderCommand::RemoveTypingPreview { username: "bob".into() });

        assert_eq!(log.entries(), &[LogEntry::Message {
            username: "bob".into(),
            text: "hello all".into(),
            timestamp: Timestamp::from_millis(1),
        }]);
        assert_eq!(log.preview("bob"), None);
    }

    #[test]
    fn removing_missing_preview_is_noop() {
        let mut log = ConversationLog::new();
        log.apply(RenderCommand::RemoveTypingPreview { username: "ghost".into() });
        assert!(log.is_empty());
    }
}
