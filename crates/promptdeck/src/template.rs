//! Prompt template records and the draft builder used to create them

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Unique identifier for a stored template
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct TemplateId(pub u64);

impl From<u64> for TemplateId {
    fn from(id: u64) -> Self {
        TemplateId(id)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reusable prompt record
///
/// Immutable after creation except for the usage counter; destroyed only by
/// explicit deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier, assigned by the store
    pub id: TemplateId,

    /// Human-readable name, not required to be unique
    pub name: String,

    /// The full generated prompt text
    pub prompt: String,

    /// Free-form classification, e.g. "DrMotion" or "Wardrobe"
    pub category: String,

    /// Emotion tag, may be empty
    pub emotion: String,

    /// Motion tag, may be empty
    pub motion: String,

    /// Target generation model, may be empty
    pub model: String,

    /// Free-form tags; duplicates permitted
    pub tags: Vec<String>,

    /// Free-form notes
    pub notes: String,

    /// Creation timestamp, set once
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Times the template has been used, starts at 0
    pub usage_count: u64,
}

impl Template {
    /// Create a new template builder
    pub fn draft(
        name: impl Into<String>,
        prompt: impl Into<String>,
        category: impl Into<String>,
    ) -> TemplateDraft {
        TemplateDraft::new(name, prompt, category)
    }
}

/// Builder for new templates with a fluent API
///
/// Name, prompt and category are required at construction; the remaining
/// descriptive fields default to empty. The store assigns the id and
/// timestamp when the draft is saved.
#[derive(Debug, Clone, Default)]
pub struct TemplateDraft {
    pub(crate) name: String,
    pub(crate) prompt: String,
    pub(crate) category: String,
    pub(crate) emotion: String,
    pub(crate) motion: String,
    pub(crate) model: String,
    pub(crate) tags: Vec<String>,
    pub(crate) notes: String,
}

impl TemplateDraft {
    /// Create a new draft
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        TemplateDraft {
            name: name.into(),
            prompt: prompt.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    /// Set the emotion tag
    pub fn emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = emotion.into();
        self
    }

    /// Set the motion tag
    pub fn motion(mut self, motion: impl Into<String>) -> Self {
        self.motion = motion.into();
        self
    }

    /// Set the target model tag
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a single tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set all tags at once
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Finalize into a template with the given id
    pub(crate) fn into_template(self, id: TemplateId) -> Template {
        Template {
            id,
            name: self.name,
            prompt: self.prompt,
            category: self.category,
            emotion: self.emotion,
            motion: self.motion,
            model: self.model,
            tags: self.tags,
            notes: self.notes,
            created_at: OffsetDateTime::now_utc(),
            usage_count: 0,
        }
    }
}
