//! Search filters and library statistics

use std::collections::BTreeMap;

use serde::Serialize;

use crate::template::Template;

/// Conjunctive filter over the template collection
///
/// Empty fields do not constrain the result; every non-empty field must
/// match. `query` is a case-insensitive substring test against name, prompt
/// and notes (any of the three). `tags` matches when the template shares at
/// least one tag with the filter.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    query: String,
    category: String,
    emotion: String,
    motion: String,
    tags: Vec<String>,
}

impl SearchFilter {
    /// Create an empty filter that matches every template
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the substring query
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Require an exact category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Require an exact emotion tag
    pub fn emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = emotion.into();
        self
    }

    /// Require an exact motion tag
    pub fn motion(mut self, motion: impl Into<String>) -> Self {
        self.motion = motion.into();
        self
    }

    /// Require at least one of the given tags
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add a single required tag alternative
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether a template passes every non-empty filter
    pub fn matches(&self, template: &Template) -> bool {
        if !self.query.is_empty() {
            let query = self.query.to_lowercase();
            let hit = template.name.to_lowercase().contains(&query)
                || template.prompt.to_lowercase().contains(&query)
                || template.notes.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        if !self.category.is_empty() && template.category != self.category {
            return false;
        }

        if !self.emotion.is_empty() && template.emotion != self.emotion {
            return false;
        }

        if !self.motion.is_empty() && template.motion != self.motion {
            return false;
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|tag| template.tags.contains(tag)) {
            return false;
        }

        true
    }
}

/// Aggregate statistics over the collection
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Number of stored templates
    pub total_templates: usize,

    /// Sum of all usage counters
    pub total_usage: u64,

    /// Template with the highest usage count, arbitrary tie-break
    pub most_used: Option<Template>,

    /// Template count per category
    pub categories: BTreeMap<String, usize>,
}
