//! Connection and timer bookkeeping for the driver.
//!
//! Owns the current WebSocket connection, the ID counter, and the channels
//! that connection tasks and reconnect timers report on. Nothing here touches
//! the terminal, so the stale-connection filter and the timers can be tested
//! on a paused tokio clock.

use std::time::Duration;

use relaychat_client::{
    ClientEvent, Environment,
    transport::{self, ConnectionHandle, ConnectionId, TransportEvent},
};
use tokio::sync::mpsc;

/// Connections and reconnect timers for one client.
///
/// # Invariants
///
/// - Connection IDs increase strictly; every [`Connections::open`] uses a new
///   one.
/// - Only events tagged with the current connection's ID are delivered.
pub struct Connections<E: Environment> {
    env: E,
    current: Option<ConnectionHandle>,
    next_id: ConnectionId,
    transport_tx: mpsc::UnboundedSender<(ConnectionId, TransportEvent)>,
    transport_rx: mpsc::UnboundedReceiver<(ConnectionId, TransportEvent)>,
    timer_tx: mpsc::UnboundedSender<()>,
    timer_rx: mpsc::UnboundedReceiver<()>,
}

impl<E: Environment> Connections<E> {
    /// No connection, no pending timers.
    pub fn new(env: E) -> Self {
        let (transport_tx, transport_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self { env, current: None, next_id: 0, transport_tx, transport_rx, timer_tx, timer_rx }
    }

    /// ID of the live connection, if any.
    pub fn current_id(&self) -> Option<ConnectionId> {
        self.current.as_ref().map(ConnectionHandle::id)
    }

    /// Stop the current connection and start a new one to `endpoint`.
    ///
    /// Must be called within a tokio runtime.
    pub fn open(&mut self, endpoint: &str) {
        if let Some(old) = self.current.take() {
            tracing::debug!(connection = old.id(), "replacing connection");
            old.stop();
        }

        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(transport::open(endpoint, id, self.transport_tx.clone()));
    }

    /// Queue a frame on the current connection.
    ///
    /// Frames are dropped when there is no connection or its task has exited.
    pub fn send(&self, frame: String) {
        // The session can still think it is open while a close is in flight
        if let Some(conn) = &self.current
            && let Err(e) = conn.send(frame)
        {
            tracing::debug!(connection = conn.id(), error = %e, "dropping frame");
        }
    }

    /// Deliver [`ClientEvent::ReconnectDue`] once after `delay`.
    ///
    /// Timers are never cancelled.
    pub fn schedule_reconnect(&self, delay: Duration) {
        let env = self.env.clone();
        let timer_tx = self.timer_tx.clone();
        tokio::spawn(async move {
            env.sleep(delay).await;
            let _ = timer_tx.send(());
        });
    }

    /// Stop the current connection. Its remaining events are dropped.
    pub fn stop(&mut self) {
        if let Some(conn) = self.current.take() {
            conn.stop();
        }
    }

    /// Wait for the next event from the current connection or a timer.
    ///
    /// Cancel safe: an event is either returned or left in its channel.
    pub async fn recv(&mut self) -> ClientEvent {
        loop {
            tokio::select! {
                Some((id, event)) = self.transport_rx.recv() => {
                    if let Some(event) = self.accept(id, event) {
                        return event;
                    }
                }
                Some(()) = self.timer_rx.recv() => return ClientEvent::ReconnectDue,
            }
        }
    }

    /// Map a transport event to a client event, dropping stale connections.
    fn accept(&self, id: ConnectionId, event: TransportEvent) -> Option<ClientEvent> {
        if self.current_id() != Some(id) {
            tracing::debug!(connection = id, ?event, "dropping event from replaced connection");
            return None;
        }

        Some(match event {
            TransportEvent::Opened => ClientEvent::TransportOpened,
            TransportEvent::Frame(frame) => ClientEvent::FrameReceived(frame),
            TransportEvent::Error(reason) => ClientEvent::TransportError { reason },
            TransportEvent::Closed => ClientEvent::TransportClosed,
        })
    }
}
