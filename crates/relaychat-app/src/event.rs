//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Protocol notifications translated from the underlying client.

use relaychat_core::RenderCommand;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection attempt in progress.
    Connecting,

    /// Connection open.
    Connected,

    /// Connection closed. A reconnect is pending.
    Disconnected,

    /// Conversation update from the client.
    Conversation(RenderCommand),
}
