pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod buffered;

pub use buffered::BufferedResponse;
pub use r#trait::ResponseCarrier;
