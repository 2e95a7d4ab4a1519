use crate::anchors::AnchorAssignment;
use crate::blocks::{Block, BlockId, BlockKind, collect_headings, find_block, find_block_mut, flatten_blocks};
use crate::editing::{Cmd, DocumentError, Patch, commands, markdown};
use crate::host::{DocumentHost, OutlineUpdate, TocController};
use crate::outline::HeadingNode;
use crate::render::{DEFAULT_CLASS_NAME, render_block};
use crate::state::TocState;
use crate::toolbar::{ToolbarControl, toolbar_controls};

/// Callback run after every change to the document.
pub type ChangeListener = Box<dyn FnMut(&mut dyn DocumentHost)>;

/// Upper bound on notification rounds triggered by one change. Anchor
/// back-fill settles after the second round.
const MAX_NOTIFY_ROUNDS: usize = 8;

/// In-memory block document hosting table of contents blocks.
///
/// Edits go through [`Document::apply`]. After each edit every table of
/// contents block and the registered listeners are notified; anchors they
/// request via [`DocumentHost::set_anchor`] are applied together once all of
/// them returned, followed by another round of notifications so they see the
/// anchors in place. A table of contents block removed from the document is
/// no longer tracked.
///
/// ```rust
/// use toc_block_engine::editing::{Cmd, Document};
/// use toc_block_engine::blocks::Block;
///
/// let mut doc = Document::from_markdown("# Intro {#intro}\n\n## Details {#details}\n");
/// let toc = doc.insert_table_of_contents(0);
///
/// let html = doc.save(toc).unwrap();
/// assert!(html.contains("<a href=\"#details\">Details</a>"));
///
/// doc.apply(Cmd::InsertBlock { index: 99, block: Block::heading(1, "Outro") }).unwrap();
/// assert!(doc.save(toc).unwrap().contains(">Outro</a>"));
/// ```
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    /// Version counter incremented on each applied change
    pub(crate) version: u64,
    /// One per table of contents block in the document
    controllers: Vec<TocController>,
    listeners: Vec<ChangeListener>,
    /// Anchors requested while listeners run
    pending_anchors: Vec<AnchorAssignment>,
    notifying: bool,
    class_name: String,
    toc_defaults: TocState,
}

/// What the editor shows for a table of contents block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub toolbar: Vec<ToolbarControl>,
    /// Editable title
    pub title: String,
    /// Live preview, identical to the saved markup
    pub markup: String,
}

impl Document {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            version: 0,
            controllers: Vec::new(),
            listeners: Vec::new(),
            pending_anchors: Vec::new(),
            notifying: false,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            toc_defaults: TocState::default(),
        }
    }

    /// Document made of `blocks`. Table of contents blocks among them are
    /// brought up to date right away.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self::new();
        doc.blocks = blocks;
        doc.attach_existing_tocs();
        doc
    }

    pub fn from_markdown(markdown: &str) -> Self {
        Self::from_markdown_with_defaults(markdown, TocState::default())
    }

    /// Like [`Document::from_markdown`], with `defaults` used for `[toc]`
    /// markers and later inserted table of contents blocks.
    pub fn from_markdown_with_defaults(markdown: &str, defaults: TocState) -> Self {
        let mut doc = Self::new().with_toc_defaults(defaults);
        doc.blocks = markdown::parse_blocks(markdown, &doc.toc_defaults);
        doc.attach_existing_tocs();
        doc
    }

    /// Class of the wrapper element in rendered markup.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_toc_defaults(mut self, defaults: TocState) -> Self {
        self.toc_defaults = defaults;
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        find_block(&self.blocks, id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Ids of all table of contents blocks, in document order.
    pub fn table_of_contents_ids(&self) -> Vec<BlockId> {
        flatten_blocks(&self.blocks)
            .into_iter()
            .filter(|b| matches!(b.kind, BlockKind::TableOfContents(_)))
            .map(|b| b.id)
            .collect()
    }

    /// Register a callback run after every change.
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Apply an edit and notify listeners.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, DocumentError> {
        let touched = commands::execute(&mut self.blocks, cmd)?;
        self.version += 1;

        let mut changed = vec![touched];
        for id in self.notify() {
            if !changed.contains(&id) {
                changed.push(id);
            }
        }

        Ok(Patch {
            changed,
            version: self.version,
        })
    }

    /// Insert a table of contents block with the document's defaults and
    /// keep it in sync with the headings from now on.
    pub fn insert_table_of_contents(&mut self, index: usize) -> BlockId {
        let block = Block::table_of_contents(self.toc_defaults.clone());
        let id = block.id;
        self.attach(id);
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
        self.version += 1;
        self.notify();
        id
    }

    /// Editor view of the table of contents block `id`.
    pub fn edit_view(&self, id: BlockId) -> Option<EditView> {
        let state = self.toc_state(id)?;
        Some(EditView {
            toolbar: toolbar_controls(state.bullet_style),
            markup: render_block(&state, &self.class_name),
            title: state.title,
        })
    }

    /// Saved markup of the table of contents block `id`.
    pub fn save(&self, id: BlockId) -> Option<String> {
        self.toc_state(id)
            .map(|state| render_block(&state, &self.class_name))
    }

    fn attach(&mut self, id: BlockId) {
        self.controllers.push(TocController::new(id));
    }

    fn attach_existing_tocs(&mut self) {
        let ids = self.table_of_contents_ids();
        if ids.is_empty() {
            return;
        }
        for id in ids {
            self.attach(id);
        }
        self.notify();
    }

    /// Update every table of contents block and run listeners until no more
    /// anchors are requested. Returns the blocks that changed on the way:
    /// tables of contents with a rewritten outline and headings that received
    /// an anchor.
    fn notify(&mut self) -> Vec<BlockId> {
        let mut controllers = std::mem::take(&mut self.controllers);
        let mut listeners = std::mem::take(&mut self.listeners);
        let mut changed = Vec::new();

        for round in 1..=MAX_NOTIFY_ROUNDS {
            self.notifying = true;
            controllers.retain(|controller| match controller.update_outline(&mut *self) {
                OutlineUpdate::Detached => {
                    log::debug!("no longer tracking table of contents {}", controller.block_id());
                    false
                }
                OutlineUpdate::Changed { .. } => {
                    if !changed.contains(&controller.block_id()) {
                        changed.push(controller.block_id());
                    }
                    true
                }
                OutlineUpdate::Unchanged { .. } => true,
            });
            for listener in listeners.iter_mut() {
                let host: &mut dyn DocumentHost = &mut *self;
                listener(host);
            }
            self.notifying = false;

            let pending = std::mem::take(&mut self.pending_anchors);
            if pending.is_empty() {
                break;
            }

            log::debug!("applying {} anchor assignments", pending.len());
            for assignment in pending {
                if self.write_anchor(assignment.identity, assignment.anchor)
                    && !changed.contains(&assignment.identity)
                {
                    changed.push(assignment.identity);
                }
            }
            self.version += 1;

            if round == MAX_NOTIFY_ROUNDS {
                log::warn!("anchor assignment did not settle after {MAX_NOTIFY_ROUNDS} rounds");
            }
        }

        // Keep listeners registered while notifying, after the existing ones.
        controllers.append(&mut self.controllers);
        self.controllers = controllers;
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
        changed
    }

    fn write_anchor(&mut self, identity: BlockId, new_anchor: String) -> bool {
        match find_block_mut(&mut self.blocks, identity).map(|b| &mut b.kind) {
            Some(BlockKind::Heading { anchor, .. }) => {
                if anchor.as_deref() == Some(new_anchor.as_str()) {
                    return false;
                }
                *anchor = Some(new_anchor);
                true
            }
            _ => {
                log::warn!("anchor requested for {identity}, which is not a heading");
                false
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHost for Document {
    fn headings(&self) -> Vec<HeadingNode> {
        collect_headings(&self.blocks)
    }

    fn toc_state(&self, id: BlockId) -> Option<TocState> {
        match &self.block(id)?.kind {
            BlockKind::TableOfContents(state) => Some(state.clone()),
            _ => None,
        }
    }

    fn set_anchor(&mut self, identity: BlockId, anchor: &str) {
        let assignment = AnchorAssignment {
            identity,
            anchor: anchor.to_string(),
        };
        if self.notifying {
            self.pending_anchors.push(assignment);
            return;
        }
        if let Err(e) = self.apply(Cmd::SetAnchor {
            id: assignment.identity,
            anchor: assignment.anchor,
        }) {
            log::warn!("could not set anchor: {e}");
        }
    }

    fn set_outline_state(&mut self, id: BlockId, state: TocState) {
        match find_block_mut(&mut self.blocks, id).map(|b| &mut b.kind) {
            Some(BlockKind::TableOfContents(stored)) => {
                *stored = state;
                self.version += 1;
            }
            _ => log::warn!("outline state for {id}, which is not a table of contents"),
        }
    }
}
