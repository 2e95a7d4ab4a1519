//! Block tree of the host document.
//!
//! A document is an ordered list of blocks, each of which may hold inner
//! blocks (a group, a quote). Only heading blocks feed the outline; the table
//! of contents block itself lives in the same tree and carries its persisted
//! state as attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::outline::HeadingNode;
use crate::state::TocState;

/// Stable identity of a block, independent of its position in the document.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Fresh random identity for a newly created block.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic identity, mostly useful in tests and fixtures.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// What a block is, with the attributes the outline cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Section heading (`<h1>`..`<h6>`)
    Heading {
        level: u32,
        content: String,
        anchor: Option<String>,
    },
    /// The table of contents block and its persisted attributes
    TableOfContents(TocState),
    Paragraph { content: String },
    /// Container whose inner blocks are part of the document flow
    Group,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub inner_blocks: Vec<Block>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            inner_blocks: Vec::new(),
        }
    }

    pub fn heading(level: u32, content: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading {
            level,
            content: content.into(),
            anchor: None,
        })
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph {
            content: content.into(),
        })
    }

    pub fn group(inner_blocks: Vec<Block>) -> Self {
        Self {
            inner_blocks,
            ..Self::new(BlockKind::Group)
        }
    }

    pub fn table_of_contents(state: TocState) -> Self {
        Self::new(BlockKind::TableOfContents(state))
    }

    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = id;
        self
    }

    pub fn with_anchor(mut self, new_anchor: impl Into<String>) -> Self {
        if let BlockKind::Heading { anchor, .. } = &mut self.kind {
            *anchor = Some(new_anchor.into());
        }
        self
    }

    /// Heading node for the outline, or `None` for non-headings and headings
    /// without text.
    pub fn as_heading_node(&self) -> Option<HeadingNode> {
        match &self.kind {
            BlockKind::Heading {
                level,
                content,
                anchor,
            } if !content.is_empty() => Some(HeadingNode {
                level: *level,
                content: content.clone(),
                anchor: anchor.clone(),
                identity: self.id,
            }),
            _ => None,
        }
    }
}

/// All blocks of the tree in document order (pre-order: a container comes
/// before its inner blocks).
pub fn flatten_blocks(blocks: &[Block]) -> Vec<&Block> {
    let mut out = Vec::new();
    push_flattened(blocks, &mut out);
    out
}

fn push_flattened<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
    for block in blocks {
        out.push(block);
        push_flattened(&block.inner_blocks, out);
    }
}

/// Heading nodes eligible for the outline, in document order. Headings with
/// empty content are left out.
pub fn collect_headings(blocks: &[Block]) -> Vec<HeadingNode> {
    flatten_blocks(blocks)
        .into_iter()
        .filter_map(Block::as_heading_node)
        .collect()
}

/// Find a block anywhere in the tree.
pub fn find_block(blocks: &[Block], id: BlockId) -> Option<&Block> {
    flatten_blocks(blocks).into_iter().find(|b| b.id == id)
}

/// Mutable lookup of a block anywhere in the tree.
pub fn find_block_mut(blocks: &mut [Block], id: BlockId) -> Option<&mut Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        if let Some(found) = find_block_mut(&mut block.inner_blocks, id) {
            return Some(found);
        }
    }
    None
}

/// Remove a block (with its inner blocks) from the tree.
pub fn remove_block(blocks: &mut Vec<Block>, id: BlockId) -> Option<Block> {
    if let Some(index) = blocks.iter().position(|b| b.id == id) {
        return Some(blocks.remove(index));
    }
    blocks
        .iter_mut()
        .find_map(|b| remove_block(&mut b.inner_blocks, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> BlockId {
        BlockId::from_u128(n)
    }

    #[test]
    fn flatten_visits_containers_before_inner_blocks() {
        let blocks = vec![
            Block::heading(1, "Intro").with_id(id(1)),
            Block::group(vec![
                Block::heading(2, "Nested").with_id(id(3)),
                Block::group(vec![Block::paragraph("deep").with_id(id(5))]).with_id(id(4)),
            ])
            .with_id(id(2)),
            Block::heading(2, "After").with_id(id(6)),
        ];

        let order: Vec<BlockId> = flatten_blocks(&blocks).iter().map(|b| b.id).collect();
        assert_eq!(order, vec![id(1), id(2), id(3), id(4), id(5), id(6)]);
    }

    #[test]
    fn collect_headings_skips_empty_and_non_heading_blocks() {
        let blocks = vec![
            Block::heading(1, "Title").with_id(id(1)),
            Block::paragraph("body"),
            Block::heading(2, "").with_id(id(2)),
            Block::group(vec![Block::heading(2, "Inside").with_anchor("inside").with_id(id(3))]),
        ];

        let headings = collect_headings(&blocks);
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].content, "Title");
        assert_eq!(headings[0].anchor, None);
        assert_eq!(headings[1].identity, id(3));
        assert_eq!(headings[1].anchor.as_deref(), Some("inside"));
    }

    #[test]
    fn find_and_remove_reach_inner_blocks() {
        let mut blocks = vec![Block::group(vec![Block::paragraph("x").with_id(id(9))])];

        assert!(find_block(&blocks, id(9)).is_some());
        if let Some(block) = find_block_mut(&mut blocks, id(9)) {
            block.kind = BlockKind::Paragraph {
                content: "y".to_string(),
            };
        }
        let removed = remove_block(&mut blocks, id(9)).unwrap();
        assert_eq!(
            removed.kind,
            BlockKind::Paragraph {
                content: "y".to_string()
            }
        );
        assert!(find_block(&blocks, id(9)).is_none());
        assert!(remove_block(&mut blocks, id(9)).is_none());
    }

    #[test]
    fn block_id_displays_hyphenated() {
        assert_eq!(id(1).to_string(), "00000000-0000-0000-0000-000000000001");
    }
}
