//! Local identity.

/// Display name used when the name field is blank.
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

/// Trim a raw name and substitute [`DEFAULT_DISPLAY_NAME`] if nothing is left.
pub fn normalize_display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() { DEFAULT_DISPLAY_NAME.to_string() } else { trimmed.to_string() }
}

/// Identity of the local client.
///
/// # Invariants
///
/// - `client_id` is assigned at most once per connection. It is cleared by
///   [`Identity::reset_connection`] and set again by the next `welcome`.
/// - `display_name`, once set, is never blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    client_id: Option<String>,
    display_name: Option<String>,
}

impl Identity {
    /// Create an identity with no client ID and no display name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Relay-assigned ID for the current connection. `None` before `welcome`.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Display name. `None` until first captured or committed.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Record the ID from a `welcome`.
    ///
    /// Returns `false` and keeps the existing ID if one was already assigned
    /// on this connection.
    pub fn observe_welcome(&mut self, client_id: String) -> bool {
        if let Some(existing) = &self.client_id {
            tracing::warn!(%existing, ignored = %client_id, "duplicate welcome on one connection");
            return false;
        }

        tracing::debug!(%client_id, "assigned client id");
        self.client_id = Some(client_id);
        true
    }

    /// Forget the connection-scoped client ID. The display name is kept.
    pub fn reset_connection(&mut self) {
        self.client_id = None;
    }

    /// Commit a display name from raw field text.
    pub fn set_display_name(&mut self, raw: &str) -> &str {
        self.display_name.insert(normalize_display_name(raw))
    }

    /// Display name, capturing it from `raw` first if none is set yet.
    pub fn ensure_display_name(&mut self, raw: &str) -> &str {
        self.display_name.get_or_insert_with(|| normalize_display_name(raw))
    }

    /// Whether `remote` is this client's own connection.
    ///
    /// `false` when either side is unknown.
    pub fn is_self(&self, remote: Option<&str>) -> bool {
        match (remote, self.client_id.as_deref()) {
            (Some(remote), Some(local)) => remote == local,
            _ => false,
        }
    }
}
