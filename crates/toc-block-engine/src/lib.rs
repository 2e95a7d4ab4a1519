pub mod anchors;
pub mod blocks;
pub mod editing;
pub mod host;
pub mod outline;
pub mod render;
pub mod state;
pub mod toolbar;

// Re-export key types for easier usage
pub use anchors::{AnchorAssignment, derive_anchor, kebab_case};
pub use blocks::{Block, BlockId, BlockKind, collect_headings, flatten_blocks};
pub use editing::{Cmd, Document, DocumentError, EditView, Patch};
pub use host::{DocumentHost, OutlineUpdate, TocController};
pub use outline::{
    HeadingNode, MAX_OUTLINE_DEPTH, OutlineBuild, OutlineNode, build_outline, outline_changed,
    outline_len,
};
pub use render::{BulletStyle, DEFAULT_CLASS_NAME, render_block, render_outline};
pub use state::{DEFAULT_TITLE, TocState};
pub use toolbar::{ToolbarControl, toolbar_controls};
