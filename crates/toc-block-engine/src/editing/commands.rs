use crate::blocks::{Block, BlockId, BlockKind, find_block_mut, remove_block};
use crate::editing::DocumentError;
use crate::render::BulletStyle;

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Insert a top level block; indexes past the end append
    InsertBlock {
        index: usize,
        block: Block,
    },
    RemoveBlock {
        id: BlockId,
    },
    /// Change a heading's text and level, keeping its anchor
    UpdateHeading {
        id: BlockId,
        content: String,
        level: u32,
    },
    SetAnchor {
        id: BlockId,
        anchor: String,
    },
    /// Toolbar selection; selecting the active style turns bullets off
    SetBulletStyle {
        id: BlockId,
        style: BulletStyle,
    },
    SetTitle {
        id: BlockId,
        title: String,
    },
}

/// Apply `cmd` to the block tree, returning the block it touched.
pub(crate) fn execute(blocks: &mut Vec<Block>, cmd: Cmd) -> Result<BlockId, DocumentError> {
    match cmd {
        Cmd::InsertBlock { index, block } => {
            let id = block.id;
            let index = index.min(blocks.len());
            blocks.insert(index, block);
            Ok(id)
        }
        Cmd::RemoveBlock { id } => remove_block(blocks, id)
            .map(|_| id)
            .ok_or(DocumentError::BlockNotFound(id)),
        Cmd::UpdateHeading {
            id,
            content: new_content,
            level: new_level,
        } => match &mut block_mut(blocks, id)?.kind {
            BlockKind::Heading { level, content, .. } => {
                *level = new_level;
                *content = new_content;
                Ok(id)
            }
            _ => Err(DocumentError::NotAHeading(id)),
        },
        Cmd::SetAnchor { id, anchor: new_anchor } => match &mut block_mut(blocks, id)?.kind {
            BlockKind::Heading { anchor, .. } => {
                *anchor = Some(new_anchor);
                Ok(id)
            }
            _ => Err(DocumentError::NotAHeading(id)),
        },
        Cmd::SetBulletStyle { id, style } => match &mut block_mut(blocks, id)?.kind {
            BlockKind::TableOfContents(state) => {
                state.toggle_bullet_style(style);
                Ok(id)
            }
            _ => Err(DocumentError::NotATableOfContents(id)),
        },
        Cmd::SetTitle { id, title } => match &mut block_mut(blocks, id)?.kind {
            BlockKind::TableOfContents(state) => {
                state.set_title(title);
                Ok(id)
            }
            _ => Err(DocumentError::NotATableOfContents(id)),
        },
    }
}

fn block_mut(blocks: &mut [Block], id: BlockId) -> Result<&mut Block, DocumentError> {
    find_block_mut(blocks, id).ok_or(DocumentError::BlockNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::find_block;
    use crate::state::TocState;

    fn id(n: u128) -> BlockId {
        BlockId::from_u128(n)
    }

    fn sample() -> Vec<Block> {
        vec![
            Block::heading(1, "Title").with_id(id(1)),
            Block::table_of_contents(TocState::default()).with_id(id(2)),
            Block::paragraph("text").with_id(id(3)),
        ]
    }

    #[test]
    fn insert_past_end_appends() {
        let mut blocks = sample();
        let block = Block::heading(2, "Last").with_id(id(4));
        assert_eq!(execute(&mut blocks, Cmd::InsertBlock { index: 99, block }), Ok(id(4)));
        assert_eq!(blocks.last().map(|b| b.id), Some(id(4)));
    }

    #[test]
    fn update_heading_keeps_anchor() {
        let mut blocks = vec![Block::heading(1, "Old").with_anchor("kept").with_id(id(1))];
        execute(
            &mut blocks,
            Cmd::UpdateHeading {
                id: id(1),
                content: "New".to_string(),
                level: 3,
            },
        )
        .unwrap();

        assert_eq!(
            blocks[0].kind,
            BlockKind::Heading {
                level: 3,
                content: "New".to_string(),
                anchor: Some("kept".to_string()),
            }
        );
    }

    #[test]
    fn commands_check_block_kind() {
        let mut blocks = sample();
        assert_eq!(
            execute(
                &mut blocks,
                Cmd::SetAnchor {
                    id: id(2),
                    anchor: "x".to_string()
                }
            ),
            Err(DocumentError::NotAHeading(id(2)))
        );
        assert_eq!(
            execute(
                &mut blocks,
                Cmd::SetTitle {
                    id: id(1),
                    title: "x".to_string()
                }
            ),
            Err(DocumentError::NotATableOfContents(id(1)))
        );
        assert_eq!(
            execute(&mut blocks, Cmd::RemoveBlock { id: id(42) }),
            Err(DocumentError::BlockNotFound(id(42)))
        );
    }

    #[test]
    fn bullet_style_and_title_update_toc_state() {
        let mut blocks = sample();
        execute(
            &mut blocks,
            Cmd::SetBulletStyle {
                id: id(2),
                style: BulletStyle::Decimal,
            },
        )
        .unwrap();
        execute(
            &mut blocks,
            Cmd::SetTitle {
                id: id(2),
                title: "On this page".to_string(),
            },
        )
        .unwrap();

        match &find_block(&blocks, id(2)).unwrap().kind {
            BlockKind::TableOfContents(state) => {
                assert_eq!(state.bullet_style, BulletStyle::Decimal);
                assert_eq!(state.title, "On this page");
            }
            other => panic!("expected table of contents, got {other:?}"),
        }
    }
}
