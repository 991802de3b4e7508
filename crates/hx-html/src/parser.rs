//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the result into the hx arena DOM.

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, QualName, parse_document, parse_fragment};
use hx_dom::{Document, DomTree, NodeId};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// How text nodes are carried over from html5ever
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Whitespace {
    /// Drop whitespace-only text (full documents: indentation noise)
    Collapse,
    /// Keep every text node (fragments: swapped content is taken verbatim)
    Keep,
}

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        tracing::debug!("Parsing HTML document ({} bytes)", html.len());

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty();
        let root = document.tree().root();
        for child in dom.document.children.borrow().iter() {
            self.convert_node(child, document.tree_mut(), Some(root), Whitespace::Collapse);
        }
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Parse a markup fragment in a `<body>` context.
    ///
    /// The returned top-level nodes are allocated in `tree` but left detached;
    /// the caller decides where they go. Multiple top-level elements and bare
    /// text are both accepted.
    pub fn parse_fragment_into(&self, tree: &mut DomTree, markup: &str) -> Vec<NodeId> {
        let context = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("body"));
        let dom = parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false).one(markup);

        // html5ever roots fragments under a synthetic <html> element
        let document_children = dom.document.children.borrow();
        let Some(html) = document_children.first() else {
            return Vec::new();
        };

        let nodes: Vec<NodeId> = html
            .children
            .borrow()
            .iter()
            .filter_map(|child| self.convert_node(child, tree, None, Whitespace::Keep))
            .collect();

        tracing::debug!("Parsed fragment into {} top-level nodes", nodes.len());
        nodes
    }

    /// Convert an RcDom node (and its subtree) into the arena.
    /// Returns the created node, if any.
    fn convert_node(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: Option<NodeId>,
        whitespace: Whitespace,
    ) -> Option<NodeId> {
        let id = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent, whitespace);
                }
                return None;
            }
            RcNodeData::Doctype { name, .. } => tree.create_doctype(name),
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if whitespace == Whitespace::Collapse && text.trim().is_empty() {
                    return None;
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value);
                }
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, Some(id), whitespace);
                }
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return None,
        };

        if let Some(parent) = parent {
            if let Err(err) = tree.append_child(parent, id) {
                tracing::warn!("Dropping parsed node {}: {}", id, err);
                return None;
            }
        }
        Some(id)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        let title = doc.query_selector("head title").unwrap();
        assert_eq!(doc.text_content(title), "Test");
    }

    #[test]
    fn test_parse_document_finds_body() {
        let doc = HtmlParser::new().parse("<div id=\"x\">hi</div>");
        assert_eq!(doc.tree().tag_name(doc.body()), Some("body"));
        assert!(doc.get_element_by_id("x").is_some());
    }

    #[test]
    fn test_fragment_nodes_are_detached() {
        let mut tree = DomTree::new();
        let nodes = HtmlParser::new().parse_fragment_into(&mut tree, "<a id=\"a1\">1</a>");
        assert_eq!(nodes.len(), 1);
        assert!(tree.parent(nodes[0]).is_none());
        assert_eq!(tree.attribute(nodes[0], "id"), Some("a1"));
        assert_eq!(tree.text_content(nodes[0]), "1");
    }

    #[test]
    fn test_fragment_plain_text() {
        let mut tree = DomTree::new();
        let nodes = HtmlParser::new().parse_fragment_into(&mut tree, "Clicked!");
        assert_eq!(nodes.len(), 1);
        assert_eq!(tree.get(nodes[0]).and_then(|n| n.as_text()), Some("Clicked!"));
    }
}
