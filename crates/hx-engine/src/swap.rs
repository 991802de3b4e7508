//! Swap Engine
//!
//! Places response markup into the document. Markup is parsed into detached
//! nodes before the tree is touched, so a failed parse or a bad target leaves
//! the document exactly as it was.

use hx_dom::{Document, DomError, DomResult, NodeId};
use serde::{Deserialize, Serialize};

use crate::TargetSpec;

/// How response markup is merged into the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SwapMode {
    /// Replace the target's children
    #[default]
    #[serde(rename = "innerHTML")]
    InnerHtml,
    /// Replace the target itself
    #[serde(rename = "outerHTML")]
    OuterHtml,
    /// Insert before the target's first child
    #[serde(rename = "prepend", alias = "afterbegin")]
    Prepend,
    /// Insert after the target's last child
    #[serde(rename = "append", alias = "beforeend")]
    Append,
}

impl SwapMode {
    /// Parse an attribute value (case-insensitive); `None` if unknown
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "innerhtml" => Some(SwapMode::InnerHtml),
            "outerhtml" => Some(SwapMode::OuterHtml),
            "prepend" | "afterbegin" => Some(SwapMode::Prepend),
            "append" | "beforeend" => Some(SwapMode::Append),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapMode::InnerHtml => "innerHTML",
            SwapMode::OuterHtml => "outerHTML",
            SwapMode::Prepend => "prepend",
            SwapMode::Append => "append",
        }
    }
}

impl std::fmt::Display for SwapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure string form of a swap: what the markup at the target's position
/// becomes, given its current inner HTML. For `outerHTML` the result replaces
/// the target element itself.
pub struct SwapPlan;

impl SwapPlan {
    pub fn preview(current_inner: &str, incoming: &str, mode: SwapMode) -> String {
        match mode {
            SwapMode::InnerHtml | SwapMode::OuterHtml => incoming.to_string(),
            SwapMode::Prepend => format!("{}{}", incoming, current_inner),
            SwapMode::Append => format!("{}{}", current_inner, incoming),
        }
    }
}

/// Nodes touched by one swap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapResult {
    /// Newly inserted top-level nodes, in document order
    pub inserted: Vec<NodeId>,
    /// Nodes detached by the swap (their subtrees went with them)
    pub removed: Vec<NodeId>,
}

/// Applies swaps to a document
pub struct SwapEngine;

impl SwapEngine {
    /// Resolve a target spec against the current document.
    /// `None` when the resolved node is not connected.
    pub fn resolve_target(doc: &Document, origin: NodeId, spec: &TargetSpec) -> Option<NodeId> {
        let node = match spec {
            TargetSpec::This => origin,
            TargetSpec::Selector(selector) => doc.query_selector(selector)?,
        };
        doc.contains(node).then_some(node)
    }

    /// Merge `markup` into `target` according to `mode`
    pub fn apply(doc: &mut Document, target: NodeId, markup: &str, mode: SwapMode) -> DomResult<SwapResult> {
        let tree = doc.tree_mut();
        if !tree.is_element(target) {
            return Err(match tree.get(target) {
                Some(_) => DomError::InvalidNodeType(target),
                None => DomError::NotFound(target),
            });
        }
        let parent = tree.parent(target);
        if mode == SwapMode::OuterHtml && parent.is_none() {
            return Err(DomError::Detached(target));
        }

        let incoming = hx_html::parse_fragment(tree, markup);
        let mut result = SwapResult {
            inserted: incoming.clone(),
            removed: Vec::new(),
        };

        match (mode, parent) {
            (SwapMode::InnerHtml, _) => {
                result.removed = tree.clear_children(target);
                for node in incoming {
                    tree.append_child(target, node)?;
                }
            }
            (SwapMode::OuterHtml, parent) => {
                let parent = parent.ok_or(DomError::Detached(target))?;
                for node in incoming {
                    tree.insert_before(parent, node, Some(target))?;
                }
                tree.remove_child(parent, target)?;
                result.removed.push(target);
            }
            (SwapMode::Prepend, _) => {
                let first = tree.children(target).next().map(|(id, _)| id);
                for node in incoming {
                    tree.insert_before(target, node, first)?;
                }
            }
            (SwapMode::Append, _) => {
                for node in incoming {
                    tree.append_child(target, node)?;
                }
            }
        }

        tracing::debug!(
            "Swapped {} into {}: {} inserted, {} removed",
            mode,
            target,
            result.inserted.len(),
            result.removed.len()
        );
        Ok(result)
    }
}
