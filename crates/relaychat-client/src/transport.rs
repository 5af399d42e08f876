//! WebSocket transport for the client.
//!
//! Provides [`open`], which spawns a task owning one WebSocket connection and
//! reports its lifecycle the way a browser socket does: `Opened`, any number
//! of `Frame`s, optionally an `Error`, then exactly one `Closed`. Protocol
//! logic remains in the Sans-IO [`Client`](crate::Client).

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Identifies one connection attempt. Newer attempts have larger IDs.
pub type ConnectionId = u64;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Lifecycle notification from a connection task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed.
    Opened,
    /// Text frame received.
    Frame(String),
    /// Connect or stream failure. `Closed` follows.
    Error(String),
    /// Connection is gone. Always the last event for a connection.
    Closed,
}

/// Handle to a spawned connection task.
pub struct ConnectionHandle {
    id: ConnectionId,
    to_server: mpsc::UnboundedSender<String>,
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectionHandle {
    /// ID this connection tags its events with.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a text frame for the socket.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Stream` if the connection task has exited.
    pub fn send(&self, frame: String) -> Result<(), TransportError> {
        self.to_server
            .send(frame)
            .map_err(|_| TransportError::Stream("connection task has exited".into()))
    }

    /// Stop the connection task. No further events are reported.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Spawn a task that connects to `endpoint` and reports events on `events`.
///
/// Must be called within a tokio runtime.
pub fn open(
    endpoint: &str,
    id: ConnectionId,
    events: mpsc::UnboundedSender<(ConnectionId, TransportEvent)>,
) -> ConnectionHandle {
    let (to_server_tx, to_server_rx) = mpsc::unbounded_channel::<String>();

    let endpoint = endpoint.to_string();
    let handle = tokio::spawn(async move {
        let result = run_connection(&endpoint, id, to_server_rx, &events).await;
        if let Err(e) = result {
            tracing::warn!(%endpoint, connection = id, error = %e, "connection failed");
            let _ = events.send((id, TransportEvent::Error(e.to_string())));
        }
        let _ = events.send((id, TransportEvent::Closed));
    });

    ConnectionHandle { id, to_server: to_server_tx, abort_handle: handle.abort_handle() }
}

/// Run one connection, bridging between channels and the socket.
///
/// Returns `Ok` on a clean close by either side.
async fn run_connection(
    endpoint: &str,
    id: ConnectionId,
    mut to_server: mpsc::UnboundedReceiver<String>,
    events: &mpsc::UnboundedSender<(ConnectionId, TransportEvent)>,
) -> Result<(), TransportError> {
    let (stream, _response) =
        connect_async(endpoint).await.map_err(|e| TransportError::Connection(e.to_string()))?;
    tracing::debug!(%endpoint, connection = id, "websocket handshake complete");

    if events.send((id, TransportEvent::Opened)).is_err() {
        return Ok(());
    }

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(frame) = outgoing else {
                    // Handle dropped without stop(); close politely
                    let _ = sink.close().await;
                    return Ok(());
                };
                sink.send(Message::Text(frame.into()))
                    .await
                    .map_err(|e| TransportError::Stream(format!("write failed: {e}")))?;
            }

            incoming = source.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if events.send((id, TransportEvent::Frame(text.as_str().to_owned()))).is_err() {
                            return Ok(());
                        }
                    },
                    Some(Ok(Message::Binary(data))) => match String::from_utf8(data.to_vec()) {
                        Ok(text) => {
                            if events.send((id, TransportEvent::Frame(text))).is_err() {
                                return Ok(());
                            }
                        },
                        Err(_) => tracing::debug!(connection = id, "dropping non-UTF-8 binary frame"),
                    },
                    Some(Ok(Message::Close(_))) => {
                        // Echo the close frame so the handshake completes
                        let _ = sink.close().await;
                        return Ok(());
                    },
                    None => return Ok(()),
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(TransportError::Stream(format!("read failed: {e}"))),
                }
            }
        }
    }
}
