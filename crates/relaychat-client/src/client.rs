//! Client state machine.
//!
//! The `Client` is the top-level state machine. It owns the session context
//! (connection, identity, typing previews) that the event loop threads through
//! every handler, so there is no ambient global state.

use relaychat_core::{
    Identity, RenderCommand, Session, SessionAction, TypingEngine, env::Environment,
};
use relaychat_proto::{Inbound, Outbound, decode, encode};

use crate::{
    ClientConfig, dispatch,
    event::{ClientAction, ClientEvent},
};

/// Client for a Relaychat relay.
///
/// Every failure path degrades to a notice or a silent drop: malformed frames
/// are logged and skipped, sends while not open are discarded.
pub struct Client<E: Environment> {
    /// Environment for wall-clock timestamps.
    env: E,

    /// Connection lifecycle.
    session: Session,

    /// Relay-assigned ID and display name.
    identity: Identity,

    /// Live previews for remote typists.
    typing: TypingEngine,
}

impl<E: Environment> Client<E> {
    /// Create a new, unconnected client.
    pub fn new(env: E, config: ClientConfig) -> Self {
        Self {
            env,
            session: Session::new(config.endpoint, config.session),
            identity: Identity::new(),
            typing: TypingEngine::new(),
        }
    }

    /// Connection state machine.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Local identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Typing previews.
    pub fn typing(&self) -> &TypingEngine {
        &self.typing
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<ClientAction> {
        match event {
            ClientEvent::Connect | ClientEvent::ReconnectDue => {
                // A replaced connection never reports its close
                self.identity.reset_connection();
                let actions = self.session.connect();
                Self::session_actions(actions)
            },
            ClientEvent::TransportOpened => {
                let actions = self.session.handle_open();
                Self::session_actions(actions)
            },
            ClientEvent::FrameReceived(frame) => self.handle_frame(&frame),
            ClientEvent::TransportError { reason } => {
                let actions = self.session.handle_error(&reason);
                Self::session_actions(actions)
            },
            ClientEvent::TransportClosed => {
                self.identity.reset_connection();
                let actions = self.session.handle_close();
                Self::session_actions(actions)
            },
            ClientEvent::TextChanged { text, name_field } => {
                let now = self.env.wall_clock_millis();
                let intent = dispatch::text_changed(&mut self.identity, &text, &name_field, now);
                self.send(&intent)
            },
            ClientEvent::Submit { text, name_field } => {
                let now = self.env.wall_clock_millis();
                match dispatch::submit(&mut self.identity, &text, &name_field, now) {
                    Some(intent) => self.send(&intent),
                    None => vec![],
                }
            },
            ClientEvent::NameCommitted { raw } => {
                let intent = dispatch::commit_name(&mut self.identity, &raw);
                self.send(&intent)
            },
        }
    }

    fn handle_frame(&mut self, frame: &str) -> Vec<ClientAction> {
        let event = match decode(frame) {
            Ok(Some(event)) => event,
            Ok(None) => {
                tracing::debug!(%frame, "ignoring frame with unknown type");
                return vec![];
            },
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed frame");
                return vec![];
            },
        };

        let commands = match event {
            Inbound::Welcome { client_id } => {
                self.identity.observe_welcome(client_id);
                vec![]
            },
            Inbound::Typing(update) => self.typing.on_typing(update, &self.identity),
            Inbound::Message(message) => self.typing.on_final_message(message),
            Inbound::UserStoppedTyping { username } => self.typing.on_stop_typing(&username),
        };

        commands.into_iter().map(ClientAction::Render).collect()
    }

    fn send(&self, intent: &Outbound) -> Vec<ClientAction> {
        let frame = match encode(intent) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(kind = intent.kind(), error = %e, "failed to encode intent");
                return vec![];
            },
        };

        self.session.send(frame).map(Self::session_action).into_iter().collect()
    }

    fn session_actions(actions: Vec<SessionAction>) -> Vec<ClientAction> {
        actions.into_iter().map(Self::session_action).collect()
    }

    fn session_action(action: SessionAction) -> ClientAction {
        match action {
            SessionAction::Open { endpoint } => ClientAction::Open { endpoint },
            SessionAction::SendFrame(frame) => ClientAction::Send(frame),
            SessionAction::Notice(text) => ClientAction::Render(RenderCommand::SystemNotice { text }),
            SessionAction::ScheduleReconnect { delay } => ClientAction::ScheduleReconnect { delay },
        }
    }
}
