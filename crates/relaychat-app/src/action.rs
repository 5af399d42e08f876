//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Start the first connection to the relay.
    Connect,

    /// Message field content changed.
    TextChanged {
        /// Message field value after the edit.
        text: String,
        /// Name field value, for lazy name capture.
        name_field: String,
    },

    /// Enter pressed on a non-blank message.
    Submit {
        /// Message field value before clearing.
        text: String,
        /// Name field value, for lazy name capture.
        name_field: String,
    },

    /// Name field committed.
    CommitName {
        /// Raw name field value.
        raw: String,
    },
}
