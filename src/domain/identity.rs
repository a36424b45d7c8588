use serde::{Deserialize, Serialize};

/// Suffix carried by registered usernames. Only stripped for display.
pub const USERNAME_SUFFIX: &str = ".id.blockstack";

/// A user-controlled account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub address: String,
    pub default_username: Option<String>,
}

impl Identity {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            default_username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.default_username = Some(username.into());
        self
    }

    pub fn has_username(&self) -> bool {
        self.default_username.is_some()
    }

    /// Username if present, otherwise the address.
    pub fn label(&self) -> &str {
        self.default_username.as_deref().unwrap_or(&self.address)
    }

    /// Label shown in lists, without the registrar suffix.
    pub fn display_label(&self) -> &str {
        let label = self.label();
        label.strip_suffix(USERNAME_SUFFIX).unwrap_or(label)
    }

    pub fn avatar_initial(&self) -> char {
        self.display_label()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}
