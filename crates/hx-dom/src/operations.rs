//! DOM Node Operations
//!
//! Core node manipulation: appendChild, prepend, insertBefore, removeChild, detach.

use crate::{DomTree, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Hierarchy request error: {child} cannot be inserted under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Invalid node type for this operation: {0}")]
    InvalidNodeType(NodeId),

    #[error("Node {0} has no parent")]
    Detached(NodeId),
}

impl DomTree {
    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if parent_node.is_text() {
            return Err(DomError::InvalidNodeType(parent));
        }
        if child == NodeId::ROOT {
            return Err(DomError::InvalidNodeType(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if already linked
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insert(parent, child)?;
        self.unlink(child);
        self.link_before(parent, child, NodeId::NONE);
        Ok(())
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_insert(parent, child)?;
        self.unlink(child);
        let first = self.nodes[parent.index()].first_child;
        self.link_before(parent, child, first);
        Ok(())
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<()> {
        self.check_insert(parent, child)?;
        let reference = match reference {
            Some(r) if r == child => {
                // Inserting a node before itself leaves it where it is
                return Ok(());
            }
            Some(r) => {
                if self.parent(r) != Some(parent) {
                    return Err(DomError::NotAChild { parent, child: r });
                }
                r
            }
            None => NodeId::NONE,
        };
        self.unlink(child);
        self.link_before(parent, child, reference);
        Ok(())
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.unlink(child);
        Ok(child)
    }

    /// Unlink a node from wherever it is. Detached nodes are left alone.
    pub fn detach(&mut self, id: NodeId) {
        if self.get(id).is_some() {
            self.unlink(id);
        }
    }

    /// Remove every child of `parent`, returning the removed ids in order
    pub fn clear_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let kids = self.child_ids(parent);
        for &kid in &kids {
            self.unlink(kid);
        }
        kids
    }

    /// Link a detached node under `parent`, before `next` (NONE = append).
    /// Caller guarantees both ids exist and `child` is unlinked.
    pub(crate) fn link_before(&mut self, parent: NodeId, child: NodeId, next: NodeId) {
        let prev = if next.is_valid() {
            self.nodes[next.index()].prev_sibling
        } else {
            self.nodes[parent.index()].last_child
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }
}
