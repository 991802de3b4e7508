//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removing a node only unlinks it. A node is
//! *connected* when following parents reaches the document root.
//!
//! Because slots are never reused, a [`NodeId`] held past a removal (an
//! in-flight exchange's origin, say) keeps naming the same detached node
//! instead of whatever was built later. The cost is that the arena only
//! grows: every swap leaves its replaced nodes behind, so a long-lived tree
//! under heavy swapping should be rebuilt from a fresh parse.

use crate::{InternedString, Node, NodeData, NodeId, StringInterner};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    interner: StringInterner,
    id_attr: InternedString,
    class_attr: InternedString,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        let mut interner = StringInterner::new();
        let id_attr = interner.intern("id");
        let class_attr = interner.intern("class");
        Self {
            nodes: vec![Node::document()],
            interner,
            id_attr,
            class_attr,
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated (connected or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(Node {
            data: NodeData::Doctype { name },
            ..Node::document()
        })
    }

    /// Set an attribute on an element. Non-elements are ignored.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let name = self.interner.intern(&name.to_ascii_lowercase());
        let (is_id, is_class) = (name == self.id_attr, name == self.class_attr);
        if let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) {
            elem.set_attr(name, value.to_string(), is_id, is_class);
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let name = self.interner.lookup(&name.to_ascii_lowercase())?;
        let (is_id, is_class) = (name == self.id_attr, name == self.class_attr);
        self.get_mut(id)?.as_element_mut()?.remove_attr(name, is_id, is_class)
    }

    /// Read an attribute by name
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Lowercase tag name, `None` for non-elements
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Parent of a node, if linked
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate the direct children of a node
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let next = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Child ids, collected (handy when the tree is about to be mutated)
    pub fn child_ids(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent).map(|(id, _)| id).collect()
    }

    /// Pre-order walk of `root` and everything below it
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.get(root).is_none() {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut kids = self.child_ids(id);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = node;
        while cur.is_valid() {
            if cur == ancestor {
                return true;
            }
            cur = self.get(cur).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node_id in self.descendants(id) {
            if let Some(text) = self.get(node_id).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the direct children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_document() {
        let tree = DomTree::new();
        assert_eq!(tree.len(), 1);
        assert!(matches!(tree.get(tree.root()).map(|n| &n.data), Some(NodeData::Document)));
    }

    #[test]
    fn test_attribute_roundtrip() {
        let mut tree = DomTree::new();
        let div = tree.create_element("DIV");
        tree.set_attribute(div, "id", "d1");
        tree.set_attribute(div, "hx-get", "/test");

        assert_eq!(tree.tag_name(div), Some("div"));
        assert_eq!(tree.attribute(div, "id"), Some("d1"));
        assert_eq!(tree.attribute(div, "hx-get"), Some("/test"));
        assert_eq!(tree.get(div).and_then(|n| n.as_element()).and_then(|e| e.id.as_deref()), Some("d1"));
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        tree.set_attribute(a, "id", "x");
        tree.set_attribute(a, "class", "one");
        tree.set_attribute(a, "id", "y");

        let elem = tree.get(a).and_then(|n| n.as_element()).map(|e| e.attrs.clone()).unwrap_or_default();
        assert_eq!(tree.resolve(elem[0].name), "id");
        assert_eq!(elem[0].value, "y");
    }

    #[test]
    fn test_remove_attribute_clears_cache() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        tree.set_attribute(a, "class", "x y");
        assert_eq!(tree.remove_attribute(a, "class").as_deref(), Some("x y"));
        assert!(tree.get(a).and_then(|n| n.as_element()).is_some_and(|e| e.classes.is_empty()));
    }

    #[test]
    fn test_detached_node_is_not_connected() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert!(!tree.is_connected(div));
        assert!(tree.is_connected(tree.root()));
    }
}
