//! Markdown import: builds the block tree a [`Document`](super::Document)
//! starts from.
//!
//! - headings (ATX and setext) become heading blocks; a `{#id}` attribute
//!   becomes the heading's anchor
//! - paragraphs become paragraph blocks, except a paragraph reading `[toc]`,
//!   which becomes a table of contents block
//! - block quotes become groups holding their inner blocks
//!
//! Everything else (lists, code, tables) carries no headings and is skipped.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::blocks::{Block, BlockKind};
use crate::state::TocState;

/// Paragraph text that marks where a table of contents goes.
pub const TOC_MARKER: &str = "[toc]";

/// Text being collected for the current leaf block.
enum Leaf {
    Heading { level: u32, anchor: Option<String> },
    Paragraph,
}

pub(crate) fn parse_blocks(markdown: &str, toc_state: &TocState) -> Vec<Block> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES);

    // One frame per open block quote, the document itself at the bottom.
    let mut frames: Vec<Vec<Block>> = vec![Vec::new()];
    let mut leaf: Option<(Leaf, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let leaf_kind = Leaf::Heading {
                    level: level as u32,
                    anchor: id.map(|id| id.to_string()),
                };
                leaf = Some((leaf_kind, String::new()));
            }
            Event::Start(Tag::Paragraph) => {
                leaf = Some((Leaf::Paragraph, String::new()));
            }
            Event::Start(Tag::BlockQuote(_)) => frames.push(Vec::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buffer)) = leaf.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buffer)) = leaf.as_mut() {
                    buffer.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Paragraph) => {
                if let Some((kind, text)) = leaf.take()
                    && let Some(frame) = frames.last_mut()
                {
                    frame.push(leaf_block(kind, text.trim(), toc_state));
                }
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                if frames.len() > 1
                    && let Some(inner) = frames.pop()
                    && let Some(parent) = frames.last_mut()
                {
                    parent.push(Block::group(inner));
                }
            }
            _ => {}
        }
    }

    // Unbalanced quotes cannot come out of the parser, but fold any leftovers.
    while frames.len() > 1 {
        if let Some(inner) = frames.pop()
            && let Some(parent) = frames.last_mut()
        {
            parent.push(Block::group(inner));
        }
    }

    frames.pop().unwrap_or_default()
}

fn leaf_block(kind: Leaf, text: &str, toc_state: &TocState) -> Block {
    match kind {
        Leaf::Heading { level, anchor } => Block::new(BlockKind::Heading {
            level,
            content: text.to_string(),
            anchor,
        }),
        Leaf::Paragraph if text.eq_ignore_ascii_case(TOC_MARKER) => {
            Block::table_of_contents(toc_state.clone())
        }
        Leaf::Paragraph => Block::paragraph(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
        blocks.iter().map(|b| b.kind.clone()).collect()
    }

    fn heading(level: u32, content: &str, anchor: Option<&str>) -> BlockKind {
        BlockKind::Heading {
            level,
            content: content.to_string(),
            anchor: anchor.map(str::to_string),
        }
    }

    #[test]
    fn headings_and_paragraphs_in_order() {
        let blocks = parse_blocks(
            "# Title\n\nIntro text\nwrapped.\n\n## Install {#setup}\n\nSub\n---\n",
            &TocState::default(),
        );

        assert_eq!(
            kinds(&blocks),
            vec![
                heading(1, "Title", None),
                BlockKind::Paragraph {
                    content: "Intro text wrapped.".to_string()
                },
                heading(2, "Install", Some("setup")),
                heading(2, "Sub", None),
            ]
        );
    }

    #[test]
    fn inline_markup_is_flattened_to_text() {
        let blocks = parse_blocks("### Using `cargo` *fast*", &TocState::default());
        assert_eq!(kinds(&blocks), vec![heading(3, "Using cargo fast", None)]);
    }

    #[test]
    fn toc_marker_becomes_table_of_contents_block() {
        let blocks = parse_blocks("[TOC]\n\n# A\n", &TocState::default());
        assert_eq!(
            blocks[0].kind,
            BlockKind::TableOfContents(TocState::default())
        );
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn block_quotes_become_groups() {
        let blocks = parse_blocks("# Top\n\n> ## Quoted\n>\n> > ### Deeper\n", &TocState::default());

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].kind, BlockKind::Group);
        assert_eq!(
            kinds(&blocks[1].inner_blocks),
            vec![heading(2, "Quoted", None), BlockKind::Group]
        );
        assert_eq!(
            kinds(&blocks[1].inner_blocks[1].inner_blocks),
            vec![heading(3, "Deeper", None)]
        );
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(parse_blocks("", &TocState::default()).is_empty());
    }
}
