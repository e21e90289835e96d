//! Session store trait defining the server-side carrier interface.

use serde_json::Value;

/// Per-client key/value store provided by the host application
///
/// One store belongs to one client session; it is never shared between
/// callers acting for different identities. Mutating methods take `&mut self`
/// so a read-then-write sequence on one session runs as a single unit.
///
/// # Example
/// ```
/// use auth_core::carriers::{InMemorySession, SessionStore};
/// use serde_json::json;
///
/// let mut session = InMemorySession::new();
/// session.set("payload", json!({"exp": 1}));
/// assert!(session.contains("payload"));
/// assert_eq!(session.remove("payload"), Some(json!({"exp": 1})));
/// assert!(!session.contains("payload"));
/// ```
pub trait SessionStore {
    /// Returns a copy of the value stored under `key`
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: Value);

    /// Removes and returns the value stored under `key`
    fn remove(&mut self, key: &str) -> Option<Value>;

    /// Whether a value is stored under `key`
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}
