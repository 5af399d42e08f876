//! Client events and actions.

use std::time::Duration;

use relaychat_core::RenderCommand;

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Reporting transport outcomes (opened, frame, error, closed)
/// - Firing scheduled reconnects
/// - Forwarding input-field activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Start the first connection.
    Connect,

    /// A timer armed by [`ClientAction::ScheduleReconnect`] elapsed.
    ReconnectDue,

    /// Connection opened.
    TransportOpened,

    /// Text frame received.
    FrameReceived(String),

    /// Transport error. A `TransportClosed` is expected to follow.
    TransportError {
        /// Error description.
        reason: String,
    },

    /// Connection closed, cleanly or not.
    TransportClosed,

    /// Message field changed.
    TextChanged {
        /// Current message field value.
        text: String,
        /// Current name field value, used if no name is set yet.
        name_field: String,
    },

    /// Enter pressed in the message field.
    Submit {
        /// Message field value at the time of submission.
        text: String,
        /// Current name field value, used if no name is set yet.
        name_field: String,
    },

    /// Name field committed.
    NameCommitted {
        /// Raw name field value.
        raw: String,
    },
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Open a connection to `endpoint`, replacing any existing one.
    Open {
        /// Relay URL.
        endpoint: String,
    },

    /// Write a text frame to the open connection.
    Send(String),

    /// Feed [`ClientEvent::ReconnectDue`] back after `delay`.
    ///
    /// Fire-and-forget: the caller must not cancel it when a later connection
    /// succeeds.
    ScheduleReconnect {
        /// Time to wait.
        delay: Duration,
    },

    /// Update the presentation layer.
    Render(RenderCommand),
}
