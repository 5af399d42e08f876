//! Core state machines for Relaychat
//!
//! Pure transition functions over explicit state. Every operation takes the
//! current state and an input, mutates the state, and returns the side effects
//! (render commands, frames to send, timers to arm) as data. No I/O happens
//! here, so every transition is testable without a socket or a display.
//!
//! # Components
//!
//! - [`Session`]: Connection lifecycle and fixed-delay reconnection policy
//! - [`Identity`]: Relay-assigned client ID and local display name
//! - [`TypingEngine`]: One live preview per remote typist
//! - [`RenderCommand`]: Instructions for the presentation layer
//! - [`env::Environment`]: Wall clock and sleeping, swappable in tests

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
mod identity;
mod render;
pub mod session;
mod typing;

pub use identity::{DEFAULT_DISPLAY_NAME, Identity, normalize_display_name};
pub use render::RenderCommand;
pub use session::{Session, SessionAction, SessionConfig, SessionState};
pub use relaychat_proto::Timestamp;
pub use typing::{TypingEngine, TypingEntry};
