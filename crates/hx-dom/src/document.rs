//! Document - High-level document API

use crate::{DomTree, NodeId, Selector};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_before(tree.root(), html, NodeId::NONE);
        tree.link_before(html, head, NodeId::NONE);
        tree.link_before(html, body, NodeId::NONE);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure), to be filled by a parser
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree has been built
    pub fn finalize(&mut self) {
        self.html_element = self.find_child_tag(self.tree.root(), "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self.find_child_tag(self.html_element, "head").unwrap_or(NodeId::NONE);
            self.body_element = self.find_child_tag(self.html_element, "body").unwrap_or(NodeId::NONE);
        }
    }

    fn find_child_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree
            .child_ids(parent)
            .into_iter()
            .find(|&id| self.tree.tag_name(id) == Some(tag))
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element (falls back to the document node when absent)
    pub fn body(&self) -> NodeId {
        if self.body_element.is_valid() {
            self.body_element
        } else {
            self.tree.root()
        }
    }

    /// Get a connected element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).into_iter().find(|&node| {
            self.tree
                .get(node)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    /// First connected element matching `selector`, document order
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_from(self.tree.root(), selector)
    }

    /// First element under (or equal to) `root` matching `selector`
    pub fn query_selector_from(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        self.tree
            .descendants(root)
            .into_iter()
            .find(|&node| sel.matches(&self.tree, node))
    }

    /// All connected elements matching `selector`, document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&node| sel.matches(&self.tree, node))
            .collect()
    }

    /// Concatenated descendant text (innerText without layout)
    pub fn text_content(&self, node: NodeId) -> String {
        self.tree.text_content(node)
    }

    /// Whether the node is part of this document
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.is_connected(node)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
