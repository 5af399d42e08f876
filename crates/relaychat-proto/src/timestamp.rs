//! Sender clock carried by final messages.

use serde::Deserialize;
use serde_json::Number;

/// Milliseconds since the Unix epoch, as the sender wrote them.
///
/// Senders are free to use any JSON number: integers, fractions, exponent
/// form, or negative values. The raw number is kept so a value the display
/// layer cannot represent still decodes and the message is not lost.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(Number);

impl Timestamp {
    /// Timestamp from whole milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Number::from(millis))
    }

    /// Whole milliseconds, truncated toward zero.
    ///
    /// `None` when the value does not fit in an `i64`.
    #[must_use]
    pub fn as_millis(&self) -> Option<i64> {
        if let Some(millis) = self.0.as_i64() {
            return Some(millis);
        }
        if self.0.is_u64() {
            return None;
        }
        let millis = self.0.as_f64()?.trunc();
        (millis.is_finite() && millis >= i64::MIN as f64 && millis < i64::MAX as f64)
            .then_some(millis as i64)
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Self::from_millis(millis)
    }
}
