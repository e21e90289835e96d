//! Session registry for hosts that serve one client from several threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::memory::InMemorySession;

/// Maps session identifiers to sessions, each behind its own lock
///
/// Different sessions never contend with each other; operations on the same
/// session are serialized for the duration of a [`SessionRegistry::with_session`]
/// call, which makes read-modify-write sequences such as a refresh atomic.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<Mutex<InMemorySession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session and returns its identifier
    pub fn open(&self) -> String {
        let session = InMemorySession::new();
        let id = session.id().to_string();
        self.lock_sessions()
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        tracing::debug!(session_id = %id, "Session opened");
        id
    }

    /// Runs `f` with exclusive access to the session `id`
    ///
    /// Returns `None` for unknown ids; sessions are only created by [`SessionRegistry::open`].
    pub fn with_session<T, F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut InMemorySession) -> T,
    {
        let entry = self.lock_sessions().get(id).map(Arc::clone)?;

        let mut session = entry.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut *session))
    }

    /// Removes the session `id`; returns whether it existed
    pub fn destroy(&self, id: &str) -> bool {
        self.lock_sessions().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock_sessions().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock_sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<InMemorySession>>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carriers::session::SessionStore;
    use serde_json::json;
    use std::thread;

    #[test]
    fn test_open_and_destroy() {
        let registry = SessionRegistry::new();
        let id = registry.open();

        assert!(registry.contains(&id));
        assert_eq!(registry.len(), 1);
        assert!(registry.destroy(&id));
        assert!(!registry.destroy(&id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_with_session_round_trip() {
        let registry = SessionRegistry::new();
        let id = registry.open();
        registry.with_session(&id, |s| s.set("k", json!("v")));

        let value = registry.with_session(&id, |s| s.get("k"));
        assert_eq!(value, Some(Some(json!("v"))));
    }

    #[test]
    fn test_unknown_id_is_not_created() {
        let registry = SessionRegistry::new();

        let result = registry.with_session("client-supplied", |s| s.set("k", json!("v")));

        assert!(result.is_none());
        assert!(!registry.contains("client-supplied"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_destroyed_session_is_not_revived() {
        let registry = SessionRegistry::new();
        let id = registry.open();
        registry.destroy(&id);

        assert!(registry.with_session(&id, |s| s.len()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_read_modify_write_is_serialized_per_session() {
        let registry = Arc::new(SessionRegistry::new());
        let id = registry.open();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let id = id.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        registry.with_session(&id, |s| {
                            let current = s.get("n").and_then(|v| v.as_i64()).unwrap_or(0);
                            s.set("n", json!(current + 1));
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let total = registry.with_session(&id, |s| s.get("n")).flatten();
        assert_eq!(total, Some(json!(800)));
    }
}
