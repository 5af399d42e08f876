//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Duration};

use relaychat_client::ClientEvent;

use crate::{App, AppEvent};

/// Input delivered by a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// User or terminal input for the [`App`].
    App(AppEvent),
    /// Transport or timer outcome for the client.
    Client(ClientEvent),
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the production TUI and in tests.
///
/// Drivers own connection identity: once [`Driver::open`] replaces a
/// connection, events from the old one must not be delivered.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` if nothing happened before an internal tick.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<DriverEvent>, Self::Error>> + Send;

    /// Open a connection to `endpoint`, replacing any current connection.
    ///
    /// Connection failures are reported later as events, not returned here.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection could not even be started.
    fn open(&mut self, endpoint: &str) -> Result<(), Self::Error>;

    /// Queue a text frame on the current connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the send fails.
    fn send_frame(&mut self, frame: String) -> Result<(), Self::Error>;

    /// Deliver [`ClientEvent::ReconnectDue`] once after `delay`.
    fn schedule_reconnect(&mut self, delay: Duration);

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
