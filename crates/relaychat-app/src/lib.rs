//! Application layer for Relaychat
//!
//! Pure state machines and generic runtime for UI and protocol orchestration,
//! enabling deterministic testing with the same code that runs in production.
//!
//! # Components
//!
//! - [`App`]: UI state machine (conversation log, input fields, focus)
//! - [`Bridge`]: Protocol bridge (translates App actions to Client events)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::{Bridge, DriverCommand};
pub use driver::{Driver, DriverEvent};
pub use event::AppEvent;
pub use input::{Focus, InputField, KeyInput};
pub use runtime::Runtime;
pub use state::{ConnectionState, ConversationLog, LogEntry};
