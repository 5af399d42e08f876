//! Client
//!
//! Action-based client state machine for the Relaychat protocol. Combines the
//! transport session, local identity, typing reconciliation and the outbound
//! intent dispatcher behind a single event/action interface.
//!
//! # Architecture
//!
//! The client follows the Sans-IO and Action-Based patterns of
//! [`relaychat_core`]. It receives events ([`ClientEvent`]), processes them
//! through pure state machine logic, and returns actions ([`ClientAction`]) for
//! the caller to execute.
//!
//! # Components
//!
//! - [`Client`]: Top-level state machine
//! - [`ClientConfig`]: Relay endpoint and session policy
//! - [`dispatch`]: Local UI actions to outgoing intents
//! - [`ClientEvent`]: Events fed into the client
//! - [`ClientAction`]: Actions produced by the client
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::open`]: Spawn a WebSocket connection task
//! - [`transport::ConnectionHandle`]: Handle for sending frames and stopping it

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod config;
pub mod dispatch;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use event::{ClientAction, ClientEvent};
pub use relaychat_core::{
    Identity, RenderCommand, SessionConfig, SessionState, Timestamp, TypingEngine,
    env::Environment,
};
