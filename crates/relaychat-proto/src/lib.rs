//! Relaychat wire protocol
//!
//! One JSON object per WebSocket text frame, discriminated by a `type` field.
//! The relay and the client agree only on the envelopes defined here.
//!
//! # Components
//!
//! - [`Inbound`]: Closed set of events the relay sends to the client
//! - [`Outbound`]: Intents the client sends to the relay
//! - [`decode`]: Frame text to [`Inbound`], tolerant of unknown `type` values
//! - [`encode`]: [`Outbound`] to frame text
//! - [`Timestamp`]: Sender clock on final messages, any JSON number

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod inbound;
mod outbound;
mod timestamp;

pub use errors::{ProtocolError, Result};
pub use inbound::{ChatMessage, Inbound, TypingUpdate, decode};
pub use outbound::{Outbound, encode};
pub use timestamp::Timestamp;
