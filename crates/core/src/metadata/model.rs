//! Category and tag model definitions

use serde::{Deserialize, Serialize};

use crate::store::Document;
use crate::{Error, Result};

/// Color given to categories and tags created without one
pub const DEFAULT_COLOR: &str = "#999999";

/// Name of the category seeded into an empty store
pub const DEFAULT_CATEGORY_NAME: &str = "General";

/// A single required classification for a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// An optional, multi-valued label for a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Payload for creating a category or a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLabel {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Partial update for a category or a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("Name cannot be empty".to_string()));
    }
    Ok(())
}

fn resolve_color(color: Option<String>) -> String {
    color
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

fn apply_label(name: &mut String, color: &mut String, patch: LabelPatch) -> Result<()> {
    if let Some(new_name) = &patch.name {
        validate_name(new_name)?;
    }
    if let Some(new_name) = patch.name {
        *name = new_name;
    }
    if let Some(new_color) = patch.color {
        *color = resolve_color(Some(new_color));
    }
    Ok(())
}

impl Document for Category {
    type Draft = NewLabel;
    type Patch = LabelPatch;

    const KIND: &'static str = "category";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewLabel) -> Result<Self> {
        validate_name(&draft.name)?;
        Ok(Self {
            id,
            name: draft.name,
            color: resolve_color(draft.color),
        })
    }

    fn apply(&mut self, patch: LabelPatch) -> Result<()> {
        apply_label(&mut self.name, &mut self.color, patch)
    }
}

impl Document for Tag {
    type Draft = NewLabel;
    type Patch = LabelPatch;

    const KIND: &'static str = "tag";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewLabel) -> Result<Self> {
        validate_name(&draft.name)?;
        Ok(Self {
            id,
            name: draft.name,
            color: resolve_color(draft.color),
        })
    }

    fn apply(&mut self, patch: LabelPatch) -> Result<()> {
        apply_label(&mut self.name, &mut self.color, patch)
    }
}
