//! Markup for the table of contents.
//!
//! The same functions produce the live preview and the saved output, so the
//! two never diverge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::outline::OutlineNode;
use crate::state::TocState;

/// Class the host gives the block wrapper when none is configured.
pub const DEFAULT_CLASS_NAME: &str = "wp-block-a8c-support-table-of-contents";

/// List marker used for the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletStyle {
    #[default]
    None,
    Disc,
    /// Numbered; nested lists get the `nested` class for outline numbering
    Decimal,
}

impl BulletStyle {
    /// Value for the CSS `list-style-type` property.
    pub fn css_value(self) -> &'static str {
        match self {
            BulletStyle::None => "none",
            BulletStyle::Disc => "disc",
            BulletStyle::Decimal => "decimal",
        }
    }

    fn list_class(self) -> Option<&'static str> {
        match self {
            BulletStyle::Decimal => Some("nested"),
            _ => None,
        }
    }
}

impl fmt::Display for BulletStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_value())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown bullet style: {0}")]
pub struct UnknownBulletStyle(pub String);

impl FromStr for BulletStyle {
    type Err = UnknownBulletStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(BulletStyle::None),
            "disc" => Ok(BulletStyle::Disc),
            "decimal" => Ok(BulletStyle::Decimal),
            other => Err(UnknownBulletStyle(other.to_string())),
        }
    }
}

/// Render the optional title followed by the nested list for `outline`.
///
/// Titles that are absent, empty or whitespace only render nothing.
pub fn render_outline(
    outline: &[OutlineNode],
    bullet_style: BulletStyle,
    title: Option<&str>,
) -> String {
    let mut html = String::new();

    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        html.push_str(&format!("<h5>{}</h5>", html_escape::encode_text(title)));
    }

    push_list(&mut html, outline, bullet_style);
    html
}

/// Saved form of the block: the outline wrapped in the block container.
pub fn render_block(state: &TocState, class_name: &str) -> String {
    format!(
        "<div class=\"{}\">{}</div>",
        html_escape::encode_double_quoted_attribute(class_name),
        render_outline(&state.outline, state.bullet_style, Some(&state.title))
    )
}

fn push_list(html: &mut String, nodes: &[OutlineNode], bullet_style: BulletStyle) {
    html.push_str(&format!(
        "<ol style=\"list-style-type:{}\"",
        bullet_style.css_value()
    ));
    if let Some(class) = bullet_style.list_class() {
        html.push_str(&format!(" class=\"{class}\""));
    }
    html.push('>');

    for node in nodes {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&node.anchor),
            html_escape::encode_text(&node.content)
        ));
        if !node.children.is_empty() {
            push_list(html, &node.children, bullet_style);
        }
        html.push_str("</li>");
    }

    html.push_str("</ol>");
}
