//! Persisted attributes of the table of contents block.

use serde::{Deserialize, Serialize};

use crate::outline::OutlineNode;
use crate::render::BulletStyle;

/// Title a new table of contents block starts with.
pub const DEFAULT_TITLE: &str = "Table of contents";

/// State stored by the host alongside the document:
/// `{ "outline": [...], "bulletStyle": "none", "title": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocState {
    #[serde(default)]
    pub outline: Vec<OutlineNode>,
    #[serde(default)]
    pub bullet_style: BulletStyle,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for TocState {
    fn default() -> Self {
        Self {
            outline: Vec::new(),
            bullet_style: BulletStyle::default(),
            title: default_title(),
        }
    }
}

impl TocState {
    /// Select a bullet style from the toolbar. Selecting the active style
    /// again turns bullets off.
    pub fn toggle_bullet_style(&mut self, next: BulletStyle) {
        self.bullet_style = if next == self.bullet_style {
            BulletStyle::None
        } else {
            next
        };
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
