//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Network uses the WebSocket
//! transport from `relaychat-client`.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use relaychat_app::{App, AppEvent, Driver, DriverEvent, KeyInput};
use relaychat_client::Environment;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{connections::Connections, ui};

/// Interval between ticks when no input arrives.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal event stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal and delegates network and timers to [`Connections`],
/// which drops events from replaced connections.
pub struct TerminalDriver<E: Environment> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connections: Connections<E>,
}

impl<E: Environment> TerminalDriver<E> {
    /// Enter raw mode and the alternate screen.
    pub fn new(env: E) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, event_stream: EventStream::new(), connections: Connections::new(env) })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Esc)
            },
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Map one item from the terminal event stream.
    ///
    /// The stream ending is an error: without input the user could never quit.
    fn convert_event(
        event: Option<io::Result<Event>>,
    ) -> Result<Option<DriverEvent>, TerminalError> {
        match event {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                Ok(Self::convert_key(key).map(|key| DriverEvent::App(AppEvent::Key(key))))
            },
            Some(Ok(Event::Resize(cols, rows))) => {
                Ok(Some(DriverEvent::App(AppEvent::Resize(cols, rows))))
            },
            Some(Ok(_)) => Ok(None),
            Some(Err(e)) => Err(TerminalError::Io(e)),
            None => Err(TerminalError::InputClosed),
        }
    }
}

impl<E: Environment> Driver for TerminalDriver<E> {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => Self::convert_event(maybe_event),

            // Connection events and reconnect timers
            event = self.connections.recv() => Ok(Some(DriverEvent::Client(event))),

            () = tokio::time::sleep(TICK_INTERVAL) => Ok(Some(DriverEvent::App(AppEvent::Tick))),
        }
    }

    fn open(&mut self, endpoint: &str) -> Result<(), Self::Error> {
        self.connections.open(endpoint);
        Ok(())
    }

    fn send_frame(&mut self, frame: String) -> Result<(), Self::Error> {
        self.connections.send(frame);
        Ok(())
    }

    fn schedule_reconnect(&mut self, delay: Duration) {
        self.connections.schedule_reconnect(delay);
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.connections.stop();
    }
}

impl<E: Environment> Drop for TerminalDriver<E> {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
