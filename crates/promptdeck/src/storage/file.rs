use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::{Result, StoreError};
use crate::template::Template;

use super::TemplateStorage;

/// File-based storage implementation
///
/// The whole collection lives in a single pretty-printed JSON array at the
/// given path. A missing file loads as an empty collection; a malformed one
/// is a load error.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage backed by the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TemplateStorage for FileStorage {
    async fn load(&self) -> Result<Vec<Template>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to read template file: {}", e)))?;

        serde_json::from_str(&json)
            .map_err(|e| StoreError::Storage(format!("Failed to parse template file: {}", e)))
    }

    async fn persist(&self, templates: &[Template]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::Storage(format!("Failed to create storage directory: {}", e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(templates)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize templates: {}", e)))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to write template file: {}", e)))?;

        Ok(())
    }
}
