//! Newtype identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog-wide product identifier.
///
/// Assigned by the product API and never changed on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: ProductId = "lip-001".into();
        assert_eq!(id.as_str(), "lip-001");
        assert_eq!(id.to_string(), "lip-001");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("p-9");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""p-9""#);

        // Numeric ids are not silently accepted.
        assert!(serde_json::from_str::<ProductId>("9").is_err());
    }
}
