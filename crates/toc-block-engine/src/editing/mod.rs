/*!
 * # Editing
 *
 * In-memory block document that hosts table of contents blocks and keeps
 * them in sync with the document's headings.
 *
 * ## Edit loop
 *
 * 1. An edit arrives as a [`Cmd`] and is applied to the block tree
 * 2. The document version is bumped
 * 3. Change listeners run; each table of contents block has one, which
 *    rebuilds its outline and requests anchors for unanchored headings
 * 4. Requested anchors are written in one go, then listeners run again so
 *    they observe the anchors (a no-op for the outline)
 *
 * The outline itself is never patched incrementally: every notification
 * rebuilds it from the full heading list and only stores it when it differs.
 *
 * ## Module Structure
 *
 * - **`document`**: `Document`, the in-memory host, and its notification loop
 * - **`commands`**: `Cmd` enum and how each command changes the block tree
 * - **`markdown`**: Markdown import into blocks
 * - **`patch`**: Edit result metadata
 */

pub mod commands;
pub mod document;
pub mod markdown;
pub mod patch;

use thiserror::Error;

use crate::blocks::BlockId;

pub use commands::Cmd;
pub use document::{ChangeListener, Document, EditView};
pub use markdown::TOC_MARKER;
pub use patch::Patch;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),
    #[error("Block {0} is not a heading")]
    NotAHeading(BlockId),
    #[error("Block {0} is not a table of contents")]
    NotATableOfContents(BlockId),
}
