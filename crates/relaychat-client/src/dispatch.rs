//! Outbound intent dispatch.
//!
//! Translates local input-field activity into protocol intents. Typing intents
//! fire on every change with no debouncing; the relay decides what to do with
//! partial text.

use relaychat_core::Identity;
use relaychat_proto::Outbound;

/// Trimmed message text, or `None` if Enter should do nothing.
pub fn submittable(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Message field changed.
///
/// Captures the display name from `name_field` if none is set yet, then
/// produces a `typing` intent carrying the untrimmed current text.
pub fn text_changed(identity: &mut Identity, text: &str, name_field: &str, now_ms: u64) -> Outbound {
    let username = identity.ensure_display_name(name_field).to_string();
    Outbound::Typing { username, text: text.to_string(), timestamp: now_ms }
}

/// Enter pressed in the message field.
///
/// Blank input produces nothing.
pub fn submit(
    identity: &mut Identity,
    text: &str,
    name_field: &str,
    now_ms: u64,
) -> Option<Outbound> {
    let text = submittable(text)?;
    let username = identity.ensure_display_name(name_field).to_string();
    Some(Outbound::Message { username, text: text.to_string(), timestamp: now_ms })
}

/// Name field committed.
pub fn commit_name(identity: &mut Identity, raw: &str) -> Outbound {
    let username = identity.set_display_name(raw).to_string();
    Outbound::UsernameChange { username }
}
