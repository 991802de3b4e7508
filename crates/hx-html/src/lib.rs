//! hx HTML
//!
//! HTML5 parsing (documents and fragments) built on html5ever, and
//! innerHTML/outerHTML serialization of the hx DOM.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{get_inner_html, get_outer_html};

use hx_dom::{Document, DomTree, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse a fragment into detached nodes owned by `tree`
pub fn parse_fragment(tree: &mut DomTree, markup: &str) -> Vec<NodeId> {
    HtmlParser::new().parse_fragment_into(tree, markup)
}
