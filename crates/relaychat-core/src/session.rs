//! Transport session state machine.
//!
//! Tracks the lifecycle of the single relay connection and owns the
//! reconnection policy. Uses the action pattern: methods mutate state and
//! return [`SessionAction`]s for the driver to execute.
//!
//! # State Machine
//!
//! ```text
//!            connect()           opened
//! ┌────────┐ ─────────> ┌────────────┐ ──────> ┌──────┐
//! │ Closed │            │ Connecting │         │ Open │
//! └────────┘ <───────── └────────────┘         └──────┘
//!     ↑  │     closed                             │
//!     │  └── ScheduleReconnect ── connect() ──┐   │ closed
//!     │                                       ↓   │
//!     └───────────────────────────────────────────┘
//! ```
//!
//! `Closed` is transient once the first connection has been attempted: every
//! close schedules exactly one retry after a fixed delay. There is no backoff,
//! no attempt limit, and no cancellation of a scheduled retry.

use std::time::Duration;

/// Delay between a close and the next connection attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Notice shown when the connection opens.
pub const NOTICE_CONNECTED: &str = "Connected to chat server";

/// Notice shown when the connection closes.
pub const NOTICE_DISCONNECTED: &str = "Disconnected from server. Trying to reconnect...";

/// Notice shown on a transport error.
pub const NOTICE_ERROR: &str = "Connection error occurred";

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection attempt in flight.
    Connecting,
    /// Connection open, sends are delivered.
    Open,
    /// No connection. A retry is pending unless `connect()` was never called.
    Closed,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fixed delay before reconnecting after any close.
    pub reconnect_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { reconnect_delay: DEFAULT_RECONNECT_DELAY }
    }
}

/// Actions returned by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Open a new connection to `endpoint`, replacing any existing one.
    Open {
        /// Relay URL.
        endpoint: String,
    },

    /// Write this frame to the open connection.
    SendFrame(String),

    /// Show a system notice to the user.
    Notice(String),

    /// Call [`Session::connect`] once after `delay`. Never cancelled.
    ScheduleReconnect {
        /// Time to wait before reconnecting.
        delay: Duration,
    },
}

/// Transport session state machine.
///
/// Pure state machine - no I/O. The driver reports transport outcomes through
/// [`Session::handle_open`], [`Session::handle_close`] and
/// [`Session::handle_error`].
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    endpoint: String,
    config: SessionConfig,
    /// Number of `connect()` calls so far.
    attempts: u64,
}

impl Session {
    /// Create a session in [`SessionState::Closed`] that has not yet connected.
    pub fn new(endpoint: impl Into<String>, config: SessionConfig) -> Self {
        Self { state: SessionState::Closed, endpoint: endpoint.into(), config, attempts: 0 }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Relay URL, fixed at construction.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fixed reconnect delay.
    pub fn reconnect_delay(&self) -> Duration {
        self.config.reconnect_delay
    }

    /// Number of connection attempts made so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Whether sends are currently delivered.
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Start a connection attempt.
    ///
    /// Valid from any state. Called while `Open` (a stray retry timer firing
    /// after the connection was already restored), the driver replaces the
    /// open connection with a new one.
    pub fn connect(&mut self) -> Vec<SessionAction> {
        if self.state == SessionState::Open {
            tracing::debug!(endpoint = %self.endpoint, "reconnect fired while open, replacing connection");
        }

        self.attempts = self.attempts.saturating_add(1);
        self.state = SessionState::Connecting;
        tracing::info!(endpoint = %self.endpoint, attempt = self.attempts, "connecting");

        vec![SessionAction::Open { endpoint: self.endpoint.clone() }]
    }

    /// Connection opened.
    pub fn handle_open(&mut self) -> Vec<SessionAction> {
        self.state = SessionState::Open;
        tracing::info!(endpoint = %self.endpoint, "connected");

        vec![SessionAction::Notice(NOTICE_CONNECTED.to_string())]
    }

    /// Connection closed, cleanly or not.
    ///
    /// Always schedules exactly one reconnect.
    pub fn handle_close(&mut self) -> Vec<SessionAction> {
        self.state = SessionState::Closed;
        tracing::info!(
            endpoint = %self.endpoint,
            delay = ?self.config.reconnect_delay,
            "disconnected, scheduling reconnect"
        );

        vec![
            SessionAction::Notice(NOTICE_DISCONNECTED.to_string()),
            SessionAction::ScheduleReconnect { delay: self.config.reconnect_delay },
        ]
    }

    /// Transport error.
    ///
    /// Reports only. Reconnection is driven by the close that follows.
    pub fn handle_error(&mut self, reason: &str) -> Vec<SessionAction> {
        tracing::warn!(endpoint = %self.endpoint, %reason, "transport error");

        vec![SessionAction::Notice(NOTICE_ERROR.to_string())]
    }

    /// Send a frame if the session is open.
    ///
    /// Returns `None` (the frame is dropped, not queued) in any other state.
    pub fn send(&self, frame: String) -> Option<SessionAction> {
        if self.state != SessionState::Open {
            tracing::debug!(state = ?self.state, "dropping frame, session not open");
            return None;
        }

        Some(SessionAction::SendFrame(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("ws://localhost:8080", SessionConfig::default())
    }

    #[test]
    fn session_lifecycle() {
        let mut session = session();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(session.attempts(), 0);

        let actions = session.connect();
        assert_eq!(session.state(), SessionState::Connecting);
        assert_eq!(actions, vec![SessionAction::Open { endpoint: "ws://localhost:8080".into() }]);

        let actions = session.handle_open();
        assert!(session.is_open());
        assert_eq!(actions, vec![SessionAction::Notice(NOTICE_CONNECTED.into())]);

        let actions = session.handle_close();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(actions, vec![
            SessionAction::Notice(NOTICE_DISCONNECTED.into()),
            SessionAction::ScheduleReconnect { delay: Duration::from_secs(3) },
        ]);
    }

    #[test]
    fn send_only_when_open() {
        let mut session = session();
        assert_eq!(session.send("a".into()), None);

        session.connect();
        assert_eq!(session.send("b".into()), None);

        session.handle_open();
        assert_eq!(session.send("c".into()), Some(SessionAction::SendFrame("c".into())));

        session.handle_close();
        assert_eq!(session.send("d".into()), None);
    }

    #[test]
    fn error_does_not_schedule_reconnect() {
        let mut session = session();
        session.connect();

        let actions = session.handle_error("connection refused");
        assert_eq!(actions, vec![SessionAction::Notice(NOTICE_ERROR.into())]);
        assert_eq!(session.state(), SessionState::Connecting);
    }

    #[test]
    fn failed_attempts_keep_constant_delay() {
        let mut session =
            Session::new("ws://relay", SessionConfig { reconnect_delay: Duration::from_millis(10) });

        for attempt in 1..=5 {
            session.connect();
            assert_eq!(session.attempts(), attempt);

            session.handle_error("refused");
            let actions = session.handle_close();
            let delays: Vec<_> = actions
                .iter()
                .filter_map(|a| match a {
                    SessionAction::ScheduleReconnect { delay } => Some(*delay),
                    _ => None,
                })
                .collect();
            assert_eq!(delays, vec![Duration::from_millis(10)]);
        }
    }

    #[test]
    fn connect_while_open_starts_new_attempt() {
        let mut session = session();
        session.connect();
        session.handle_open();

        let actions = session.connect();
        assert_eq!(session.state(), SessionState::Connecting);
        assert!(matches!(actions.as_slice(), [SessionAction::Open { .. }]));
    }
}
