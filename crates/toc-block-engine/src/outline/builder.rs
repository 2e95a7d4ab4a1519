use crate::anchors::{AnchorAssignment, derive_anchor};

use super::{HeadingNode, OutlineBuild, OutlineNode};

/// Nesting depth beyond which deeper headings are kept as siblings.
pub const MAX_OUTLINE_DEPTH: usize = 64;

/// Build the nested outline for `headings`.
///
/// Each heading appears exactly once in the result. Headings lacking an
/// anchor (or carrying an empty one) get a derived anchor, reported in
/// [`OutlineBuild::pending_anchors`]. The outline is at most
/// [`MAX_OUTLINE_DEPTH`] levels deep.
pub fn build_outline(headings: &[HeadingNode]) -> OutlineBuild {
    let mut cursor = OutlineCursor::new(headings);
    let outline = cursor.build_level(None, 1);
    log::debug!(
        "built outline: {} headings, {} top level entries, {} anchors pending",
        headings.len(),
        outline.len(),
        cursor.pending_anchors.len()
    );

    OutlineBuild {
        outline,
        pending_anchors: cursor.pending_anchors,
    }
}

/// Front-consuming walk over the heading slice. Recursive levels share the
/// position, so a nested call resumes where the previous one stopped.
struct OutlineCursor<'a> {
    headings: &'a [HeadingNode],
    pos: usize,
    pending_anchors: Vec<AnchorAssignment>,
}

impl<'a> OutlineCursor<'a> {
    fn new(headings: &'a [HeadingNode]) -> Self {
        Self {
            headings,
            pos: 0,
            pending_anchors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&'a HeadingNode> {
        self.headings.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a HeadingNode> {
        let heading = self.headings.get(self.pos)?;
        self.pos += 1;
        Some(heading)
    }

    /// Collect the nodes of one level.
    ///
    /// With a `parent_level` the level ends at the first heading shallower
    /// than it. Without one (the top of the outline) nothing ends the level,
    /// and a shallower heading lowers the baseline instead. At `depth`
    /// [`MAX_OUTLINE_DEPTH`] deeper headings join the level as siblings.
    fn build_level(&mut self, parent_level: Option<u32>, depth: usize) -> Vec<OutlineNode> {
        let mut nodes: Vec<OutlineNode> = Vec::new();
        let Some(first) = self.peek() else {
            return nodes;
        };
        let mut level = parent_level.unwrap_or(first.level);

        while let Some(next) = self.peek() {
            if next.level > level {
                if depth < MAX_OUTLINE_DEPTH {
                    let children = self.build_level(Some(next.level), depth + 1);
                    match nodes.last_mut() {
                        Some(parent) => parent.children.extend(children),
                        None => nodes.extend(children),
                    }
                    continue;
                }
                log::debug!(
                    "outline depth limit reached, keeping level {} heading as a sibling",
                    next.level
                );
            }

            if parent_level.is_some() && next.level < level {
                return nodes;
            }

            let Some(heading) = self.bump() else {
                break;
            };
            let node = self.outline_node(heading);
            nodes.push(node);

            if parent_level.is_none() && heading.level < level {
                level = heading.level;
            }
        }

        nodes
    }

    fn outline_node(&mut self, heading: &HeadingNode) -> OutlineNode {
        let anchor = match heading.anchor.as_deref() {
            Some(existing) if !existing.is_empty() => existing.to_string(),
            _ => {
                let derived = derive_anchor(&heading.content, &heading.identity);
                self.pending_anchors.push(AnchorAssignment {
                    identity: heading.identity,
                    anchor: derived.clone(),
                });
                derived
            }
        };

        OutlineNode::new(heading.content.clone(), anchor)
    }
}
