//! Relay-to-client envelopes.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Timestamp,
    errors::{ProtocolError, Result},
};

/// `type` values this client understands. Anything else is skipped.
const KNOWN_TYPES: &[&str] = &["welcome", "typing", "message", "user_stopped_typing"];

/// Events sent by the relay.
///
/// # Invariants
///
/// - Closed Set: Adding a variant requires extending [`KNOWN_TYPES`], otherwise
///   [`decode`] treats the new `type` as unknown and skips it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// Relay assigned an identifier to this connection.
    Welcome {
        /// Opaque identifier for the local client.
        #[serde(rename = "clientId")]
        client_id: String,
    },

    /// Ephemeral in-progress text from some user.
    Typing(TypingUpdate),

    /// Committed message for the conversation log.
    Message(ChatMessage),

    /// A user cleared or abandoned their draft.
    UserStoppedTyping {
        /// User whose preview should be retired.
        username: String,
    },
}

/// Ephemeral typing update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypingUpdate {
    /// Display name of the typist.
    pub username: String,
    /// Current, possibly partial, draft text. Empty means "stopped".
    pub text: String,
    /// Originating connection. Absent when the relay does not tag echoes.
    #[serde(rename = "clientId", default)]
    pub client_id: Option<String>,
}

/// Final message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    /// Display name of the sender.
    pub username: String,
    /// Message body.
    pub text: String,
    /// Sender clock, milliseconds since the Unix epoch. Not relay-corrected.
    pub timestamp: Timestamp,
}

/// Decode one frame.
///
/// Returns `Ok(None)` for a well-formed envelope whose `type` is not one of
/// the known variants.
///
/// # Errors
///
/// - `ProtocolError::InvalidJson` if the text is not JSON
/// - `ProtocolError::MissingType` if there is no string `type` field
/// - `ProtocolError::InvalidEnvelope` if a known variant has bad fields
pub fn decode(frame: &str) -> Result<Option<Inbound>> {
    let value: Value =
        serde_json::from_str(frame).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;

    let kind = value.get("type").and_then(Value::as_str).ok_or(ProtocolError::MissingType)?;
    if !KNOWN_TYPES.contains(&kind) {
        return Ok(None);
    }
    let kind = kind.to_owned();

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ProtocolError::InvalidEnvelope { kind, reason: e.to_string() })
}
