//! HashMap-backed session store

use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::r#trait::SessionStore;

/// In-memory session for tests and single-process hosts
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    id: String,
    values: HashMap<String, Value>,
}

impl InMemorySession {
    /// Creates an empty session with a random identifier
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Creates an empty session with the given identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drops every stored value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl SessionStore for InMemorySession {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
