//! Element Query
//!
//! Compound simple selectors: `tag`, `#id`, `.class`, `*` and combinations such
//! as `div#main.card`. Combinators are not supported; they fail to parse.

use crate::{DomTree, NodeId};

/// A single compound selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    /// Parse a selector string. Returns `None` for empty or unsupported input.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(|c: char| c.is_whitespace() || ">+~,[:".contains(c)) {
            return None;
        }

        let mut sel = Selector::default();
        let mut rest = s;

        // Leading tag or universal
        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if !tag.is_empty() && tag != "*" {
            sel.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                b'#' => sel.id = Some(name.to_string()),
                _ => sel.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        Some(sel)
    }

    /// Check if an element matches
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.get(node).and_then(|n| n.as_element()) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if tree.resolve(elem.name) != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| elem.has_class(c))
    }
}
