use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a client (entity) submitting trade instructions.
///
/// Client ids and settlement-date keys both render as strings but name
/// unrelated things, so each aggregation namespace gets its own newtype.
///
/// # Examples
///
/// ```
/// use trade_register::core::client::ClientId;
///
/// let foo = ClientId::new("foo");
/// let bar = ClientId::new("bar");
/// assert_ne!(foo, bar);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_equality() {
        let a = ClientId::new("foo");
        let b = ClientId::new("foo");
        let c = ClientId::new("bari");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_client_display() {
        let c = ClientId::new("cag");
        assert_eq!(format!("{}", c), "cag");
    }
}
