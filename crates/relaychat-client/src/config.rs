//! Client configuration.

use relaychat_core::SessionConfig;

/// Relay endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Relay URL. Fixed for the lifetime of the client.
    pub endpoint: String,
    /// Reconnection policy.
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Default configuration pointed at `endpoint`.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), session: SessionConfig::default() }
    }
}
