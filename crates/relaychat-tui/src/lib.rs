//! Terminal UI for Relaychat
//!
//! A thin shell over [`relaychat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`relaychat_app::Runtime`].
//!
//! This crate only handles terminal events, rendering, and wiring the
//! WebSocket transport to the runtime.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod connections;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use relaychat_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use connections::Connections;
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
