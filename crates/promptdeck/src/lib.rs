//! Promptdeck is a prompt template library: reusable generation prompts
//! with metadata, usage-ranked search, and JSON file persistence.

pub mod error;
pub mod search;
pub mod storage;
pub mod store;
pub mod template;

// Re-export core types
pub use error::{Result, StoreError};
pub use search::{SearchFilter, StoreStats};
pub use storage::TemplateStorage;
pub use store::TemplateStore;
pub use template::{Template, TemplateDraft, TemplateId};

/// Get the library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
