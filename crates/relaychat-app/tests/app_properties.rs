//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary key and frame sequences.

use std::{collections::HashSet, future::Future, time::Duration};

use proptest::prelude::*;
use relaychat_app::{App, AppAction, AppEvent, Bridge, Focus, KeyInput, LogEntry};
use relaychat_client::{ClientConfig, ClientEvent, Environment, RenderCommand, Timestamp};

#[derive(Clone)]
struct FixedClock;

impl Environment for FixedClock {
    fn wall_clock_millis(&self) -> u64 {
        0
    }

    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        async {}
    }
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        8 => prop_oneof![Just(' '), Just('a'), Just('b'), Just('é')].prop_map(KeyInput::Char),
        2 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Delete),
        2 => Just(KeyInput::Enter),
        1 => Just(KeyInput::Tab),
        1 => Just(KeyInput::Left),
        1 => Just(KeyInput::Right),
        1 => Just(KeyInput::Home),
        1 => Just(KeyInput::End),
    ]
}

fn render_strategy() -> impl Strategy<Value = RenderCommand> {
    let user = prop_oneof![Just("alice"), Just("bob"), Just("carol")].prop_map(String::from);
    prop_oneof![
        4 => (user.clone(), "[a-z]{1,4}")
            .prop_map(|(username, text)| RenderCommand::UpsertTypingPreview { username, text }),
        2 => user.clone().prop_map(|username| RenderCommand::RemoveTypingPreview { username }),
        1 => (user, "[a-z]{1,4}").prop_map(|(username, text)| RenderCommand::AppendFinalMessage {
            username,
            text,
            timestamp: Timestamp::from_millis(1),
        }),
        1 => "[a-z]{1,8}".prop_map(|text| RenderCommand::SystemNotice { text }),
    ]
}

fn frame_strategy() -> impl Strategy<Value = String> {
    let user = prop_oneof![Just("alice"), Just("bob")];
    let id = prop_oneof![Just("c1"), Just("c2"), Just("c3")];
    prop_oneof![
        5 => (user.clone(), prop_oneof![Just(""), Just(" "), Just("hi"), Just("hey")], id)
            .prop_map(|(u, t, id)| {
                format!(r#"{{"type":"typing","username":"{u}","text":"{t}","clientId":"{id}"}}"#)
            }),
        2 => user.clone().prop_map(|u| format!(r#"{{"type":"user_stopped_typing","username":"{u}"}}"#)),
        2 => user.prop_map(|u| {
            format!(r#"{{"type":"message","username":"{u}","text":"done","timestamp":3}}"#)
        }),
        1 => Just("not json".to_string()),
        1 => Just(r#"{"type":"mystery"}"#.to_string()),
    ]
}

fn typing_users(entries: &[LogEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            LogEntry::Typing { username, .. } => Some(username.as_str()),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_submit_only_nonblank_and_clears(keys in prop::collection::vec(key_strategy(), 0..80)) {
        let mut app = App::new("ws://relay.test".into(), "alice".into());

        for key in keys {
            let focus_before = app.focus();
            let text_before = app.message_field().value().to_string();
            let actions = app.handle(AppEvent::Key(key));

            for action in &actions {
                match action {
                    AppAction::Submit { text, .. } => {
                        prop_assert!(!text.trim().is_empty());
                        prop_assert_eq!(text, &text_before);
                        prop_assert_eq!(app.message_field().value(), "");
                    },
                    AppAction::TextChanged { text, .. } => {
                        prop_assert_eq!(focus_before, Focus::Message);
                        prop_assert_eq!(text, app.message_field().value());
                    },
                    _ => {},
                }
            }

            if !actions.iter().any(|a| matches!(a, AppAction::Submit { .. }))
                && !matches!(key, KeyInput::Char(_) | KeyInput::Backspace | KeyInput::Delete)
            {
                prop_assert_eq!(app.message_field().value(), text_before);
            }

            let field = app.message_field();
            prop_assert!(field.cursor() <= field.value().chars().count());
        }
    }

    #[test]
    fn prop_log_keeps_one_preview_per_user(commands in prop::collection::vec(render_strategy(), 0..60)) {
        let mut app = App::new("ws://relay.test".into(), String::new());

        for command in commands {
            app.handle(AppEvent::Conversation(command));

            let users = typing_users(app.log().entries());
            let unique: HashSet<_> = users.iter().collect();
            prop_assert_eq!(users.len(), unique.len());
        }
    }

    #[test]
    fn prop_log_previews_match_engine(frames in prop::collection::vec(frame_strategy(), 0..60)) {
        let mut app = App::new("ws://relay.test".into(), "me".into());
        let mut bridge = Bridge::new(FixedClock, ClientConfig::with_endpoint("ws://relay.test"));

        for app_event in bridge.process_app_action(AppAction::Connect) {
            app.handle(app_event);
        }

        let mut feed = |app: &mut App, event: ClientEvent| {
            for app_event in bridge.handle_client_event(event) {
                app.handle(app_event);
            }
        };
        feed(&mut app, ClientEvent::TransportOpened);
        feed(&mut app, ClientEvent::FrameReceived(r#"{"type":"welcome","clientId":"c1"}"#.into()));

        for frame in frames {
            feed(&mut app, ClientEvent::FrameReceived(frame));
        }

        let mut logged: Vec<_> = typing_users(app.log().entries());
        logged.sort_unstable();
        let mut live: Vec<_> = bridge.client().typing().entries().map(|e| e.username.as_str()).collect();
        live.sort_unstable();
        prop_assert_eq!(logged, live);

        for entry in bridge.client().typing().entries() {
            prop_assert_eq!(app.log().preview(&entry.username), Some(entry.last_text.as_str()));
        }
    }
}
