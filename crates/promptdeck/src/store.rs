//! The template store: an in-memory collection with write-through persistence

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[cfg(feature = "fs")]
use std::path::Path;

use tokio::sync::RwLock;
use tracing::warn;

use crate::search::{SearchFilter, StoreStats};
use crate::storage::TemplateStorage;
use crate::template::{Template, TemplateDraft, TemplateId};

/// Durable collection of prompt templates
///
/// The collection is loaded once at construction and rewritten to storage
/// after every mutation. A failed write leaves the in-memory collection
/// ahead of the durable copy until the next successful write; mutating
/// operations report this through their boolean return instead of raising.
/// The internal lock makes each read-modify-persist sequence atomic, but the
/// store is designed for a single logical writer.
pub struct TemplateStore {
    storage: Arc<dyn TemplateStorage>,
    templates: RwLock<Vec<Template>>,
}

impl TemplateStore {
    /// Open a store backed by the given storage
    ///
    /// A load failure is recovered by starting with an empty collection, so
    /// a corrupt backing file presents as "no templates yet" rather than an
    /// error state.
    pub async fn open(storage: Arc<dyn TemplateStorage>) -> Self {
        let templates = match storage.load().await {
            Ok(templates) => templates,
            Err(e) => {
                warn!("Failed to load templates, starting with an empty store: {}", e);
                Vec::new()
            }
        };

        Self {
            storage,
            templates: RwLock::new(templates),
        }
    }

    async fn persist(&self, templates: &[Template]) -> bool {
        match self.storage.persist(templates).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to persist templates: {}", e);
                false
            }
        }
    }

    // Ids are assigned max-existing + 1, not collection length + 1, so a
    // delete followed by a save can never reuse a live id.
    fn next_id(templates: &[Template]) -> TemplateId {
        TemplateId(templates.iter().map(|t| t.id.0).max().unwrap_or(0) + 1)
    }

    /// Save a new template
    ///
    /// Returns false when the durable write fails; the in-memory append is
    /// kept either way.
    pub async fn save(&self, draft: TemplateDraft) -> bool {
        let mut templates = self.templates.write().await;
        let id = Self::next_id(&templates);
        templates.push(draft.into_template(id));
        self.persist(&templates).await
    }

    /// Get a template by id
    pub async fn get(&self, id: TemplateId) -> Option<Template> {
        let templates = self.templates.read().await;
        templates.iter().find(|t| t.id == id).cloned()
    }

    /// Search the collection
    ///
    /// Results are sorted by usage count descending; ties keep their
    /// insertion order.
    pub async fn search(&self, filter: &SearchFilter) -> Vec<Template> {
        let templates = self.templates.read().await;
        let mut results: Vec<Template> = templates
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        results
    }

    /// Record one use of a template; a missing id is a no-op
    pub async fn increment_usage(&self, id: TemplateId) {
        let mut templates = self.templates.write().await;
        if let Some(template) = templates.iter_mut().find(|t| t.id == id) {
            template.usage_count += 1;
            self.persist(&templates).await;
        }
    }

    /// Delete a template by id
    ///
    /// Deleting a missing id persists the unchanged collection and reports
    /// success.
    pub async fn delete(&self, id: TemplateId) -> bool {
        let mut templates = self.templates.write().await;
        templates.retain(|t| t.id != id);
        self.persist(&templates).await
    }

    /// Export the full collection to a JSON file at the given path
    #[cfg(feature = "fs")]
    pub async fn export(&self, path: impl AsRef<Path>) -> bool {
        let templates = self.templates.read().await;

        let json = match serde_json::to_string_pretty(&*templates) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize export: {}", e);
                return false;
            }
        };

        match tokio::fs::write(path.as_ref(), json).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to write export file {}: {}",
                    path.as_ref().display(),
                    e
                );
                false
            }
        }
    }

    /// Import templates from a JSON file at the given path
    ///
    /// Imported records get fresh ids starting past the current maximum. An
    /// unreadable or malformed file fails the whole operation with the
    /// collection unchanged.
    #[cfg(feature = "fs")]
    pub async fn import(&self, path: impl AsRef<Path>) -> bool {
        let json = match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    "Failed to read import file {}: {}",
                    path.as_ref().display(),
                    e
                );
                return false;
            }
        };

        let imported: Vec<Template> = match serde_json::from_str(&json) {
            Ok(imported) => imported,
            Err(e) => {
                warn!(
                    "Failed to parse import file {}: {}",
                    path.as_ref().display(),
                    e
                );
                return false;
            }
        };

        let mut templates = self.templates.write().await;
        let mut next = Self::next_id(&templates).0;
        for mut template in imported {
            template.id = TemplateId(next);
            next += 1;
            templates.push(template);
        }
        self.persist(&templates).await
    }

    /// Distinct categories across the collection, sorted
    pub async fn categories(&self) -> Vec<String> {
        let templates = self.templates.read().await;
        let categories: BTreeSet<&str> = templates.iter().map(|t| t.category.as_str()).collect();
        categories.into_iter().map(String::from).collect()
    }

    /// Distinct tags across the collection, sorted
    pub async fn tag_names(&self) -> Vec<String> {
        let templates = self.templates.read().await;
        let tags: BTreeSet<&str> = templates
            .iter()
            .flat_map(|t| t.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(String::from).collect()
    }

    /// Library statistics; zeroed for an empty collection
    pub async fn stats(&self) -> StoreStats {
        let templates = self.templates.read().await;

        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for template in templates.iter() {
            *categories.entry(template.category.clone()).or_insert(0) += 1;
        }

        StoreStats {
            total_templates: templates.len(),
            total_usage: templates.iter().map(|t| t.usage_count).sum(),
            most_used: templates.iter().max_by_key(|t| t.usage_count).cloned(),
            categories,
        }
    }

    /// Number of stored templates
    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    /// Whether the store holds no templates
    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}
