//! Presentation commands.
//!
//! State machines describe what the user should see; a renderer decides how.
//! All text fields are untrusted and must be escaped by the renderer.

use relaychat_proto::Timestamp;

/// Instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Show a client-generated notice (connection status and errors).
    SystemNotice {
        /// Notice text.
        text: String,
    },

    /// Create the preview for `username`, or replace its content in place.
    UpsertTypingPreview {
        /// Remote typist.
        username: String,
        /// Latest draft text, never blank.
        text: String,
    },

    /// Retire the preview for `username`.
    RemoveTypingPreview {
        /// Remote typist.
        username: String,
    },

    /// Append a committed message to the conversation log.
    AppendFinalMessage {
        /// Sender display name.
        username: String,
        /// Message body.
        text: String,
        /// Sender clock, milliseconds since the Unix epoch.
        timestamp: Timestamp,
    },
}
