//! Client-to-relay envelopes.

use serde::{Deserialize, Serialize};

use crate::errors::{ProtocolError, Result};

/// Intents sent to the relay.
///
/// Derives `Deserialize` so relays and tests can read what a client sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    /// Local display name was committed.
    UsernameChange {
        /// Trimmed, defaulted display name.
        username: String,
    },

    /// Draft text changed. Sent on every edit.
    Typing {
        /// Display name of the local user.
        username: String,
        /// Current, possibly partial, draft text.
        text: String,
        /// Client clock, milliseconds since the Unix epoch.
        timestamp: u64,
    },

    /// Draft was submitted.
    Message {
        /// Display name of the local user.
        username: String,
        /// Trimmed, non-empty message body.
        text: String,
        /// Client clock, milliseconds since the Unix epoch.
        timestamp: u64,
    },
}

impl Outbound {
    /// Wire name of this intent.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UsernameChange { .. } => "username_change",
            Self::Typing { .. } => "typing",
            Self::Message { .. } => "message",
        }
    }
}

/// Encode an intent as frame text.
///
/// # Errors
///
/// - `ProtocolError::Encode` if serialization fails
pub fn encode(intent: &Outbound) -> Result<String> {
    serde_json::to_string(intent).map_err(|e| ProtocolError::Encode(e.to_string()))
}
