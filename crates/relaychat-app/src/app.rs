//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the application completely decoupled from I/O and protocol
//! mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the conversation log, including in-place typing previews.
//! - Owns the name and message fields and which one has focus.
//! - Tracks high-level connection state for UI feedback.

use relaychat_client::dispatch;

use crate::{AppAction, AppEvent, ConnectionState, ConversationLog, Focus, InputField, KeyInput};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or socket.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Relay URL, for display.
    endpoint: String,
    /// Conversation log.
    log: ConversationLog,
    /// Display name field.
    name: InputField,
    /// Message composition field.
    message: InputField,
    /// Field receiving keystrokes.
    focus: Focus,
    /// Name field value at the last commit or focus change. Leaving the field
    /// with a different value commits it.
    name_baseline: String,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create a new App for `endpoint` with the name field pre-filled.
    ///
    /// Focus starts on the message field if a name was given, otherwise on
    /// the name field.
    pub fn new(endpoint: String, name: String) -> Self {
        let focus = if name.trim().is_empty() { Focus::Name } else { Focus::Message };
        Self {
            state: ConnectionState::Disconnected,
            endpoint,
            log: ConversationLog::new(),
            name_baseline: name.clone(),
            name: InputField::with_value(name),
            message: InputField::new(),
            focus,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                self.state = ConnectionState::Connected;
                vec![AppAction::Render]
            },
            AppEvent::Disconnected => {
                self.state = ConnectionState::Disconnected;
                vec![AppAction::Render]
            },
            AppEvent::Conversation(command) => {
                self.log.apply(command);
                vec![AppAction::Render]
            },
        }
    }

    /// Initiate the first connection to the relay.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => self.quit(),
            KeyInput::Tab => self.switch_focus(),
            KeyInput::Enter => match self.focus {
                Focus::Message => self.submit_message(),
                Focus::Name => {
                    let mut actions = self.commit_name();
                    actions.push(AppAction::Render);
                    actions
                },
            },
            KeyInput::Char(_)
            | KeyInput::Backspace
            | KeyInput::Delete
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Home
            | KeyInput::End => self.edit(key),
        }
    }

    fn edit(&mut self, key: KeyInput) -> Vec<AppAction> {
        let field = match self.focus {
            Focus::Name => &mut self.name,
            Focus::Message => &mut self.message,
        };

        let changed = match key {
            KeyInput::Char(c) => {
                field.insert(c);
                true
            },
            KeyInput::Backspace => field.backspace(),
            KeyInput::Delete => field.delete(),
            KeyInput::Left => {
                field.move_left();
                false
            },
            KeyInput::Right => {
                field.move_right();
                false
            },
            KeyInput::Home => {
                field.move_home();
                false
            },
            KeyInput::End => {
                field.move_end();
                false
            },
            KeyInput::Enter | KeyInput::Tab | KeyInput::Esc => false,
        };

        if changed && self.focus == Focus::Message {
            vec![
                AppAction::TextChanged {
                    text: self.message.value().to_string(),
                    name_field: self.name.value().to_string(),
                },
                AppAction::Render,
            ]
        } else {
            vec![AppAction::Render]
        }
    }

    /// Enter in the message field. Blank input is left untouched.
    fn submit_message(&mut self) -> Vec<AppAction> {
        if dispatch::submittable(self.message.value()).is_none() {
            return vec![];
        }

        let text = self.message.value().to_string();
        self.message.clear();
        vec![AppAction::Submit { text, name_field: self.name.value().to_string() }, AppAction::Render]
    }

    fn commit_name(&mut self) -> Vec<AppAction> {
        self.name_baseline = self.name.value().to_string();
        vec![AppAction::CommitName { raw: self.name_baseline.clone() }]
    }

    fn switch_focus(&mut self) -> Vec<AppAction> {
        let mut actions = Vec::new();
        match self.focus {
            Focus::Name if self.name.value() != self.name_baseline => {
                actions.extend(self.commit_name());
            },
            Focus::Name => {},
            Focus::Message => self.name_baseline = self.name.value().to_string(),
        }

        self.focus = self.focus.toggled();
        actions.push(AppAction::Render);
        actions
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Relay URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Conversation log.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Display name field.
    pub fn name_field(&self) -> &InputField {
        &self.name
    }

    /// Message composition field.
    pub fn message_field(&self) -> &InputField {
        &self.message
    }

    /// Field receiving keystrokes.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

#[cfg(test)]
mod tests {
    use relaychat_core::RenderCommand;

    use super::*;

    fn type_text(app: &mut App, text: &str) -> Vec<AppAction> {
        text.chars().flat_map(|c| app.handle(AppEvent::Key(KeyInput::Char(c)))).collect()
    }

    #[test]
    fn initial_focus_follows_prefill() {
        assert_eq!(App::new("ws://x".into(), String::new()).focus(), Focus::Name);
        assert_eq!(App::new("ws://x".into(), "alice".into()).focus(), Focus::Message);
    }

    #[test]
    fn every_message_edit_emits_text_changed() {
        let mut app = App::new("ws://x".into(), "alice".into());
        let actions = type_text(&mut app, "hi");

        assert_eq!(actions, vec![
            AppAction::TextChanged { text: "h".into(), name_field: "alice".into() },
            AppAction::Render,
            AppAction::TextChanged { text: "hi".into(), name_field: "alice".into() },
            AppAction::Render,
        ]);

        let actions = app.handle(AppEvent::Key(KeyInput::Backspace));
        assert_eq!(actions[0], AppAction::TextChanged { text: "h".into(), name_field: "alice".into() });
    }

    #[test]
    fn cursor_moves_do_not_emit_typing() {
        let mut app = App::new("ws://x".into(), "alice".into());
        type_text(&mut app, "ab");

        assert_eq!(app.handle(AppEvent::Key(KeyInput::Left)), vec![AppAction::Render]);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Delete)).len(), 2);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Delete)), vec![AppAction::Render]);
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut app = App::new("ws://x".into(), "alice".into());
        type_text(&mut app, " hey ");

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));
        assert_eq!(actions, vec![
            AppAction::Submit { text: " hey ".into(), name_field: "alice".into() },
            AppAction::Render
        ]);
        assert_eq!(app.message_field().value(), "");
    }

    #[test]
    fn blank_enter_keeps_input() {
        let mut app = App::new("ws://x".into(), "alice".into());
        type_text(&mut app, "   ");

        assert!(app.handle(AppEvent::Key(KeyInput::Enter)).is_empty());
        assert_eq!(app.message_field().value(), "   ");
    }

    #[test]
    fn name_edits_do_not_emit_typing() {
        let mut app = App::new("ws://x".into(), String::new());
        let actions = type_text(&mut app, "bob");

        assert!(actions.iter().all(|a| *a == AppAction::Render));
        assert_eq!(app.name_field().value(), "bob");
    }

    #[test]
    fn enter_in_name_field_commits() {
        let mut app = App::new("ws://x".into(), String::new());
        type_text(&mut app, "bob");

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));
        assert_eq!(actions, vec![AppAction::CommitName { raw: "bob".into() }, AppAction::Render]);

        // Unchanged since the commit, so leaving does not commit again
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Tab)), vec![AppAction::Render]);
        assert_eq!(app.focus(), Focus::Message);
    }

    #[test]
    fn leaving_changed_name_field_commits() {
        let mut app = App::new("ws://x".into(), "alice".into());
        app.handle(AppEvent::Key(KeyInput::Tab));
        assert_eq!(app.focus(), Focus::Name);

        app.handle(AppEvent::Key(KeyInput::Backspace));
        let actions = app.handle(AppEvent::Key(KeyInput::Tab));
        assert_eq!(actions, vec![AppAction::CommitName { raw: "alic".into() }, AppAction::Render]);
    }

    #[test]
    fn esc_quits() {
        let mut app = App::new("ws://x".into(), String::new());
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), vec![AppAction::Quit]);
    }

    #[test]
    fn connection_events_update_state() {
        let mut app = App::new("ws://x".into(), String::new());
        assert_eq!(app.connect(), vec![AppAction::Connect, AppAction::Render]);
        assert_eq!(app.connection_state(), ConnectionState::Connecting);

        app.handle(AppEvent::Connected);
        assert_eq!(app.connection_state(), ConnectionState::Connected);

        app.handle(AppEvent::Disconnected);
        assert_eq!(app.connection_state(), ConnectionState::Disconnected);
    }

    #[test]
    fn conversation_events_reach_log() {
        let mut app = App::new("ws://x".into(), String::new());
        app.handle(AppEvent::Conversation(RenderCommand::SystemNotice { text: "hi".into() }));
        assert_eq!(app.log().len(), 1);
    }
}
