//! Storage abstraction for the template collection

#[cfg(feature = "fs")]
mod file;
#[cfg(feature = "fs")]
pub use file::FileStorage;

mod memory;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::error::Result;
use crate::template::Template;

/// Durable backing for the full template collection
///
/// The store rewrites the whole collection on every mutation, so backends
/// only need whole-collection load and persist. There is no incremental or
/// append-log format.
#[async_trait]
pub trait TemplateStorage: 'static + Sync + Send {
    /// Load the full collection
    async fn load(&self) -> Result<Vec<Template>>;

    /// Persist the full collection, replacing whatever was stored before
    async fn persist(&self, templates: &[Template]) -> Result<()>;
}
