//! Seam between the outline core and the document that embeds the block.

use crate::anchors::AnchorAssignment;
use crate::blocks::BlockId;
use crate::outline::{HeadingNode, build_outline, outline_changed};
use crate::state::TocState;

/// What the table of contents needs from the document editor hosting it.
pub trait DocumentHost {
    /// Current headings in document order, empty ones already left out.
    fn headings(&self) -> Vec<HeadingNode>;

    /// Persisted state of the table of contents block `id`.
    fn toc_state(&self, id: BlockId) -> Option<TocState>;

    /// Persist `anchor` on the heading block `identity`.
    fn set_anchor(&mut self, identity: BlockId, anchor: &str);

    /// Persist the presentation state of the table of contents block `id`.
    fn set_outline_state(&mut self, id: BlockId, state: TocState);
}

/// Outcome of [`TocController::update_outline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineUpdate {
    /// The block is no longer part of the document
    Detached,
    Unchanged {
        pending_anchors: Vec<AnchorAssignment>,
    },
    Changed {
        pending_anchors: Vec<AnchorAssignment>,
    },
}

impl OutlineUpdate {
    pub fn pending_anchors(&self) -> &[AnchorAssignment] {
        match self {
            OutlineUpdate::Detached => &[],
            OutlineUpdate::Unchanged { pending_anchors }
            | OutlineUpdate::Changed { pending_anchors } => pending_anchors,
        }
    }
}

/// Keeps one table of contents block in sync with the document headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocController {
    block_id: BlockId,
}

impl TocController {
    pub fn new(block_id: BlockId) -> Self {
        Self { block_id }
    }

    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    /// Recompute the outline from the host's headings.
    ///
    /// Headings without an anchor get one requested through
    /// [`DocumentHost::set_anchor`]. The block state is only written back when
    /// the outline differs from the stored one.
    pub fn update_outline(&self, host: &mut dyn DocumentHost) -> OutlineUpdate {
        let Some(stored) = host.toc_state(self.block_id) else {
            log::debug!("table of contents {} detached, skipping", self.block_id);
            return OutlineUpdate::Detached;
        };

        let build = build_outline(&host.headings());
        for assignment in &build.pending_anchors {
            host.set_anchor(assignment.identity, &assignment.anchor);
        }

        if !outline_changed(&stored.outline, &build.outline) {
            return OutlineUpdate::Unchanged {
                pending_anchors: build.pending_anchors,
            };
        }

        log::debug!("outline of table of contents {} changed", self.block_id);
        host.set_outline_state(
            self.block_id,
            TocState {
                outline: build.outline,
                ..stored
            },
        );
        OutlineUpdate::Changed {
            pending_anchors: build.pending_anchors,
        }
    }
}
