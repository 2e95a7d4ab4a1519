//! # Outline
//!
//! Turns the flat, ordered list of document headings into the nested outline
//! shown by the table of contents.
//!
//! ## Shape
//!
//! A heading becomes a child of the nearest preceding heading with a strictly
//! lower level; headings at the same level stay siblings in document order.
//! When the document starts deeper than it continues (an `h3` followed later
//! by an `h2`), the top level baseline drops to the shallower level instead of
//! failing, so both end up as top level entries.
//!
//! ## Anchors
//!
//! Every outline node carries an anchor. Headings that have none get one
//! derived from their text and block id; the derived anchors are returned in
//! [`OutlineBuild::pending_anchors`] so the host can persist them on the
//! heading blocks. The outline already uses them, without waiting for the
//! host to apply the assignment.
//!
//! Building is stateless: the same headings always produce the same outline.

mod builder;

use serde::{Deserialize, Serialize};

use crate::anchors::AnchorAssignment;
use crate::blocks::BlockId;

pub use builder::{MAX_OUTLINE_DEPTH, build_outline};

/// Heading as seen by the outline builder. Supplied by the host, read only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    /// Nesting level, 1 being the top
    pub level: u32,
    /// Heading text, never empty
    pub content: String,
    /// Anchor already stored on the heading, if any
    pub anchor: Option<String>,
    /// Block the heading came from
    pub identity: BlockId,
}

/// Entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub content: String,
    #[serde(default)]
    pub anchor: String,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(content: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            anchor: anchor.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, this node included.
    pub fn count(&self) -> usize {
        1 + outline_len(&self.children)
    }
}

/// Result of [`build_outline`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineBuild {
    pub outline: Vec<OutlineNode>,
    /// Anchors derived for headings that had none, in document order
    pub pending_anchors: Vec<AnchorAssignment>,
}

/// Total number of nodes in an outline, descendants included.
pub fn outline_len(outline: &[OutlineNode]) -> usize {
    outline.iter().map(OutlineNode::count).sum()
}

/// Whether `next` differs from the stored outline. Compares content, anchors
/// and children, order sensitive.
pub fn outline_changed(previous: &[OutlineNode], next: &[OutlineNode]) -> bool {
    previous != next
}
