pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;
pub mod registry;

pub use memory::InMemorySession;
pub use r#trait::SessionStore;
pub use registry::SessionRegistry;
