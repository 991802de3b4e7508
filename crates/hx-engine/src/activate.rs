//! Activation
//!
//! Walks a subtree and binds every element that carries a request URL.

use hx_dom::{DomTree, NodeId};

use crate::{AttributeReader, TriggerResolver};

/// Outcome of activating one subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    /// Elements that gained at least one listener, in document order
    pub bound: Vec<NodeId>,
    /// Elements whose `load` trigger is due, in document order
    pub load_fired: Vec<NodeId>,
}

pub struct Activator;

impl Activator {
    /// Pre-order walk of `root` (included). Nothing outside the subtree is read.
    pub fn activate(
        tree: &DomTree,
        root: NodeId,
        reader: &dyn AttributeReader,
        triggers: &mut TriggerResolver,
    ) -> Activation {
        let mut activation = Activation::default();
        for node in tree.descendants(root) {
            if !tree.is_element(node) {
                continue;
            }
            let Some(directives) = reader.read(tree, node) else {
                continue;
            };
            let binding = triggers.bind(tree, node, &directives);
            if !binding.new_events.is_empty() {
                activation.bound.push(node);
            }
            if binding.fire_load {
                activation.load_fired.push(node);
            }
        }
        if !activation.bound.is_empty() || !activation.load_fired.is_empty() {
            tracing::debug!(
                "Activated {}: {} bound, {} load",
                root,
                activation.bound.len(),
                activation.load_fired.len()
            );
        }
        activation
    }
}
