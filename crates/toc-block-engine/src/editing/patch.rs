use crate::blocks::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Blocks touched by the command, tables of contents whose outline it
    /// rewrote, and headings that got an anchor back-filled
    pub changed: Vec<BlockId>,
    pub version: u64,
}
