//! Codec errors.

use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding frames.
///
/// An unknown `type` value is not an error: [`crate::decode`] returns
/// `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame text is not valid JSON.
    #[error("malformed JSON: {0}")]
    InvalidJson(String),

    /// Frame is not an object with a string `type` field.
    #[error("envelope has no string `type` field")]
    MissingType,

    /// Known `type`, but fields are missing or of the wrong shape.
    #[error("invalid `{kind}` envelope: {reason}")]
    InvalidEnvelope {
        /// Value of the `type` field.
        kind: String,
        /// Underlying deserializer message.
        reason: String,
    },

    /// Serialization of an outgoing intent failed.
    #[error("failed to encode frame: {0}")]
    Encode(String),
}
