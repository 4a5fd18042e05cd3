//! Key identifiers and captured key events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Name of a physical key as reported by the capture source (e.g. "a", "ctrl")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    /// Create a new key identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for KeyId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&KeyId> for KeyId {
    fn from(key: &KeyId) -> Self {
        key.clone()
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single key-down captured from the input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed
    pub key: KeyId,
    /// When it was pressed
    pub timestamp: Instant,
}

impl KeyEvent {
    /// Create a new key event
    pub fn new(key: impl Into<KeyId>, timestamp: Instant) -> Self {
        Self {
            key: key.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_id_conversions() {
        let a: KeyId = "a".into();
        assert_eq!(a, KeyId::new("a"));
        assert_eq!(a.as_str(), "a");
        assert_eq!(a.to_string(), "a");
    }

    #[test]
    fn test_key_id_ordering() {
        let mut keys = vec![KeyId::from("o"), KeyId::from("ctrl"), KeyId::from("i")];
        keys.sort();
        let names: Vec<&str> = keys.iter().map(KeyId::as_str).collect();
        assert_eq!(names, ["ctrl", "i", "o"]);
    }
}
