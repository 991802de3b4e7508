//! Markup Serialization
//!
//! Writes a subtree back out as markup, the way a swap target's `innerHTML`
//! and `outerHTML` read after a response has been applied.

use hx_dom::{DomTree, NodeData, NodeId};

/// Elements written without an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text is written verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Markup of a node's children
pub fn get_inner_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    write_children(tree, node, &mut out);
    out
}

/// Markup of a node including its own tag
pub fn get_outer_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, node, &mut out);
    out
}

fn write_children(tree: &DomTree, parent: NodeId, out: &mut String) {
    for child in tree.child_ids(parent) {
        write_node(tree, child, out);
    }
}

fn write_node(tree: &DomTree, node: NodeId, out: &mut String) {
    let Some(data) = tree.get(node).map(|n| &n.data) else {
        return;
    };

    match data {
        NodeData::Document => write_children(tree, node, out),
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(tree.resolve(*name));
            out.push('>');
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Text(text) => push_escaped(out, &text.content, false),
        NodeData::Element(elem) => {
            let tag = tree.resolve(elem.name);
            out.push('<');
            out.push_str(tag);
            for attr in &elem.attrs {
                out.push(' ');
                out.push_str(tree.resolve(attr.name));
                // Boolean attributes keep their bare form
                if !attr.value.is_empty() {
                    out.push_str("=\"");
                    push_escaped(out, &attr.value, true);
                    out.push('"');
                }
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }
            if RAW_TEXT_ELEMENTS.contains(&tag) {
                for child in tree.child_ids(node) {
                    if let Some(text) = tree.get(child).and_then(|n| n.as_text()) {
                        out.push_str(text);
                    }
                }
            } else {
                write_children(tree, node, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Escape for a text node, or for a double-quoted attribute value
fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
