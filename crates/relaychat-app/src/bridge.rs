//! Protocol-to-Application translation layer.
//!
//! The [`Bridge`] wraps the Sans-IO [`relaychat_client::Client`] and adapts it
//! to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts [`crate::AppAction`]s into client events.
//! - Accumulates [`DriverCommand`]s (connections to open, frames to send,
//!   timers to arm) for the driver to execute in the next I/O cycle.
//! - Converts client results back into [`crate::AppEvent`]s to update the UI.

use std::time::Duration;

use relaychat_client::{Client, ClientAction, ClientConfig, ClientEvent, Environment, SessionState};

use crate::{AppAction, AppEvent};

/// I/O the driver must perform on behalf of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Open a connection to `endpoint`, replacing any existing one.
    Open {
        /// Relay URL.
        endpoint: String,
    },

    /// Write a text frame to the current connection.
    Send(String),

    /// Deliver [`ClientEvent::ReconnectDue`] after `delay`. Never cancelled.
    ScheduleReconnect {
        /// Time to wait.
        delay: Duration,
    },
}

/// Bridge between App and Client protocol logic.
///
/// Generic over Environment so tests can pin the wall clock.
pub struct Bridge<E: Environment> {
    client: Client<E>,
    commands: Vec<DriverCommand>,
}

impl<E: Environment> Bridge<E> {
    /// Create a new Bridge with the given environment and configuration.
    pub fn new(env: E, config: ClientConfig) -> Self {
        Self { client: Client::new(env, config), commands: Vec::new() }
    }

    /// Underlying client.
    pub fn client(&self) -> &Client<E> {
        &self.client
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        let event = match action {
            AppAction::Connect => ClientEvent::Connect,
            AppAction::TextChanged { text, name_field } => {
                ClientEvent::TextChanged { text, name_field }
            },
            AppAction::Submit { text, name_field } => ClientEvent::Submit { text, name_field },
            AppAction::CommitName { raw } => ClientEvent::NameCommitted { raw },
            AppAction::Render | AppAction::Quit => return vec![],
        };

        self.handle_client_event(event)
    }

    /// Feed a transport or timer event reported by the driver.
    pub fn handle_client_event(&mut self, event: ClientEvent) -> Vec<AppEvent> {
        let before = self.client.session().state();
        let actions = self.client.handle(event);
        let after = self.client.session().state();

        let mut events = Vec::new();
        if before != after {
            tracing::debug!(from = ?before, to = ?after, "session state changed");
            events.push(match after {
                SessionState::Connecting => AppEvent::Connecting,
                SessionState::Open => AppEvent::Connected,
                SessionState::Closed => AppEvent::Disconnected,
            });
        }

        events.extend(self.process_client_actions(actions));
        events
    }

    /// Take pending driver commands.
    pub fn take_commands(&mut self) -> Vec<DriverCommand> {
        std::mem::take(&mut self.commands)
    }

    fn process_client_actions(&mut self, actions: Vec<ClientAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ClientAction::Open { endpoint } => {
                    self.commands.push(DriverCommand::Open { endpoint });
                },
                ClientAction::Send(frame) => {
                    self.commands.push(DriverCommand::Send(frame));
                },
                ClientAction::ScheduleReconnect { delay } => {
                    self.commands.push(DriverCommand::ScheduleReconnect { delay });
                },
                ClientAction::Render(command) => {
                    events.push(AppEvent::Conversation(command));
                },
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use relaychat_core::RenderCommand;

    use super::*;

    #[derive(Clone)]
    struct TestEnv;

    impl Environment for TestEnv {
        fn wall_clock_millis(&self) -> u64 {
            42
        }

        fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
            async {}
        }
    }

    fn bridge() -> Bridge<TestEnv> {
        Bridge::new(TestEnv, ClientConfig::with_endpoint("ws://relay.test"))
    }

    #[test]
    fn connect_produces_open_command() {
        let mut bridge = bridge();
        let events = bridge.process_app_action(AppAction::Connect);

        assert_eq!(events, vec![AppEvent::Connecting]);
        assert_eq!(bridge.take_commands(), vec![DriverCommand::Open {
            endpoint: "ws://relay.test".into()
        }]);
        assert!(bridge.take_commands().is_empty());
    }

    #[test]
    fn open_reports_connected_and_notice() {
        let mut bridge = bridge();
        bridge.process_app_action(AppAction::Connect);

        let events = bridge.handle_client_event(ClientEvent::TransportOpened);
        assert_eq!(events, vec![
            AppEvent::Connected,
            AppEvent::Conversation(RenderCommand::SystemNotice {
                text: "Connected to chat server".into()
            }),
        ]);
    }

    #[test]
    fn close_schedules_reconnect() {
        let mut bridge = bridge();
        bridge.process_app_action(AppAction::Connect);
        bridge.handle_client_event(ClientEvent::TransportOpened);
        bridge.take_commands();

        let events = bridge.handle_client_event(ClientEvent::TransportClosed);
        assert_eq!(events[0], AppEvent::Disconnected);
        assert_eq!(bridge.take_commands(), vec![DriverCommand::ScheduleReconnect {
            delay: Duration::from_secs(3)
        }]);
    }

    #[test]
    fn submit_produces_send_when_open() {
        let mut bridge = bridge();
        bridge.process_app_action(AppAction::Connect);
        bridge.handle_client_event(ClientEvent::TransportOpened);
        bridge.take_commands();

        let events = bridge.process_app_action(AppAction::Submit {
            text: "hi".into(),
            name_field: "alice".into(),
        });
        assert!(events.is_empty());
        assert_eq!(bridge.take_commands(), vec![DriverCommand::Send(
            r#"{"type":"message","username":"alice","text":"hi","timestamp":42}"#.into()
        )]);
    }

    #[test]
    fn ui_only_actions_are_ignored() {
        let mut bridge = bridge();
        assert!(bridge.process_app_action(AppAction::Render).is_empty());
        assert!(bridge.process_app_action(AppAction::Quit).is_empty());
        assert!(bridge.take_commands().is_empty());
    }
}
