//! Ready-made identity payload for applications identifying users by id and role.
//!
//! The authenticator accepts any serializable identity; this type covers the
//! common case.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User identifier
    pub id: i64,

    /// Role name, e.g. `User` or `Admin`
    pub role: String,
}

impl UserIdentity {
    pub fn new(id: i64, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}
