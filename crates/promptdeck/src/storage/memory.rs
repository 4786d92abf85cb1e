use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::template::Template;

use super::TemplateStorage;

/// In-process storage backend
///
/// Useful for tests and for embedding a store without touching the
/// filesystem. `set_fail_persist` turns every subsequent persist into a
/// failure, which exercises the store's weak-consistency contract.
#[derive(Default)]
pub struct MemoryStorage {
    templates: Mutex<Vec<Template>>,
    fail_persist: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent persist fail
    pub fn set_fail_persist(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the last successfully persisted collection
    pub fn persisted(&self) -> Vec<Template> {
        self.templates
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TemplateStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Template>> {
        let templates = self
            .templates
            .lock()
            .map_err(|_| StoreError::Storage("storage lock poisoned".to_string()))?;
        Ok(templates.clone())
    }

    async fn persist(&self, templates: &[Template]) -> Result<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("persist disabled".to_string()));
        }

        let mut stored = self
            .templates
            .lock()
            .map_err(|_| StoreError::Storage("storage lock poisoned".to_string()))?;
        *stored = templates.to_vec();
        Ok(())
    }
}
