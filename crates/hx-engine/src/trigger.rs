//! Trigger Resolution
//!
//! Turns `hx-trigger` values into listeners, and DOM events into the list of
//! elements whose requests they fire.
//!
//! Grammar: comma-separated entries, each an event name followed by optional
//! modifiers (`click once, focus`). A missing or malformed spec falls back to
//! the element's natural event.

use std::collections::{HashMap, HashSet};

use hx_dom::{DomTree, NodeId};

use crate::Directives;

/// Pseudo-event fired once when an element is activated
pub const LOAD_EVENT: &str = "load";

/// One event an element listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEntry {
    pub event: String,
    /// Listener is removed after its first firing
    pub once: bool,
}

impl TriggerEntry {
    pub fn new(event: &str) -> Self {
        Self {
            event: event.to_string(),
            once: false,
        }
    }
}

/// Parsed `hx-trigger` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpec {
    pub entries: Vec<TriggerEntry>,
}

impl TriggerSpec {
    /// Parse a trigger value; `None` if empty or malformed
    pub fn parse(raw: &str) -> Option<Self> {
        let mut entries = Vec::new();
        for part in raw.split(',') {
            let mut tokens = part.split_whitespace();
            let Some(event) = tokens.next() else {
                continue;
            };
            if !is_event_name(event) {
                return None;
            }
            let mut entry = TriggerEntry::new(&event.to_ascii_lowercase());
            for modifier in tokens {
                match modifier {
                    "once" => entry.once = true,
                    other => tracing::debug!("Ignoring trigger modifier {:?}", other),
                }
            }
            entries.push(entry);
        }
        (!entries.is_empty()).then_some(Self { entries })
    }

    /// Natural event of an element
    pub fn default_for(tag: &str) -> Self {
        let event = match tag {
            "form" => "submit",
            "input" | "select" | "textarea" => "change",
            _ => "click",
        };
        Self {
            entries: vec![TriggerEntry::new(event)],
        }
    }

    /// Parsed `raw`, or the default for `tag` when absent or malformed
    pub fn resolve(raw: Option<&str>, tag: &str) -> Self {
        match raw {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                tracing::debug!("Malformed trigger {:?} on <{}>, using default", raw, tag);
                Self::default_for(tag)
            }),
            None => Self::default_for(tag),
        }
    }
}

fn is_event_name(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Whether an event travels up the ancestor chain
pub fn bubbles(event: &str) -> bool {
    !matches!(event, "focus" | "blur" | "load" | "unload" | "mouseenter" | "mouseleave")
}

/// Registered listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub event: String,
    pub once: bool,
}

/// What binding one element changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    /// Events that got a listener just now
    pub new_events: Vec<String>,
    /// The element asked for `load` and has not had it yet
    pub fire_load: bool,
}

impl Binding {
    pub fn is_empty(&self) -> bool {
        self.new_events.is_empty() && !self.fire_load
    }
}

/// Listener registry keyed by element
#[derive(Debug, Default)]
pub struct TriggerResolver {
    listeners: HashMap<NodeId, Vec<Listener>>,
    /// Events each element was ever bound to; survives `once` removal so a
    /// re-scan never re-attaches
    bound: HashMap<NodeId, HashSet<String>>,
}

impl TriggerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach listeners for an element's trigger spec. Binding the same
    /// element again only adds events it has never had.
    pub fn bind(&mut self, tree: &DomTree, element: NodeId, directives: &Directives) -> Binding {
        let tag = tree.tag_name(element).unwrap_or("");
        let spec = TriggerSpec::resolve(directives.trigger.as_deref(), tag);

        let mut binding = Binding::default();
        for entry in spec.entries {
            if !self.bound.entry(element).or_default().insert(entry.event.clone()) {
                continue;
            }
            if entry.event == LOAD_EVENT {
                binding.fire_load = true;
                continue;
            }
            binding.new_events.push(entry.event.clone());
            self.listeners.entry(element).or_default().push(Listener {
                event: entry.event,
                once: entry.once,
            });
        }

        if !binding.is_empty() {
            tracing::trace!("Bound {} to {:?} (load: {})", element, binding.new_events, binding.fire_load);
        }
        binding
    }

    /// Elements whose request `event` on `target` fires, nearest first.
    /// With `consume` the first handler stops propagation.
    pub fn handlers_for(&mut self, tree: &DomTree, target: NodeId, event: &str, consume: bool) -> Vec<NodeId> {
        let mut path = vec![target];
        if bubbles(event) {
            let mut cur = tree.parent(target);
            while let Some(node) = cur {
                path.push(node);
                cur = tree.parent(node);
            }
        }

        let mut handlers = Vec::new();
        for node in path {
            let Some(list) = self.listeners.get_mut(&node) else {
                continue;
            };
            let Some(pos) = list.iter().position(|l| l.event == event) else {
                continue;
            };
            if list[pos].once {
                list.remove(pos);
            }
            handlers.push(node);
            if consume {
                break;
            }
        }
        handlers
    }

    /// Drop every listener and bound marker in a subtree
    pub fn unbind_subtree(&mut self, tree: &DomTree, root: NodeId) {
        for node in tree.descendants(root) {
            self.listeners.remove(&node);
            self.bound.remove(&node);
        }
    }

    /// Whether the element has ever been bound to anything
    pub fn is_bound(&self, element: NodeId) -> bool {
        self.bound.get(&element).is_some_and(|events| !events.is_empty())
    }

    /// Events the element currently listens for
    pub fn events(&self, element: NodeId) -> Vec<&str> {
        self.listeners
            .get(&element)
            .map(|list| list.iter().map(|l| l.event.as_str()).collect())
            .unwrap_or_default()
    }

    /// Total live listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SwapMode, TargetSpec};
    use hx_net::Method;

    fn directives(trigger: Option<&str>) -> Directives {
        Directives {
            method: Method::Get,
            url: "/test".into(),
            trigger: trigger.map(String::from),
            swap: SwapMode::InnerHtml,
            target: TargetSpec::This,
        }
    }

    fn nested() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("button");
        tree.append_child(tree.root(), outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        (tree, outer, inner)
    }

    #[test]
    fn test_parse() {
        let spec = TriggerSpec::parse("click once, Focus").unwrap();
        assert_eq!(spec.entries.len(), 2);
        assert!(spec.entries[0].once);
        assert_eq!(spec.entries[1].event, "focus");
        assert!(TriggerSpec::parse("").is_none());
        assert!(TriggerSpec::parse(" , ").is_none());
        assert!(TriggerSpec::parse("cl!ck").is_none());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TriggerSpec::default_for("form").entries[0].event, "submit");
        assert_eq!(TriggerSpec::default_for("textarea").entries[0].event, "change");
        assert_eq!(TriggerSpec::default_for("div").entries[0].event, "click");
        assert_eq!(TriggerSpec::resolve(Some("%%"), "input").entries[0].event, "change");
    }

    #[test]
    fn test_bind_is_idempotent() {
        let (tree, _, button) = nested();
        let mut resolver = TriggerResolver::new();
        let first = resolver.bind(&tree, button, &directives(None));
        assert_eq!(first.new_events, vec!["click".to_string()]);
        let second = resolver.bind(&tree, button, &directives(None));
        assert!(second.is_empty());
        assert_eq!(resolver.listener_count(), 1);
    }

    #[test]
    fn test_load_fires_once() {
        let (tree, _, button) = nested();
        let mut resolver = TriggerResolver::new();
        assert!(resolver.bind(&tree, button, &directives(Some("load"))).fire_load);
        assert!(!resolver.bind(&tree, button, &directives(Some("load"))).fire_load);
        assert_eq!(resolver.listener_count(), 0);
        assert!(resolver.is_bound(button));
    }

    #[test]
    fn test_bubbling_and_consume() {
        let (tree, outer, inner) = nested();
        let mut resolver = TriggerResolver::new();
        resolver.bind(&tree, outer, &directives(None));
        resolver.bind(&tree, inner, &directives(None));

        assert_eq!(resolver.handlers_for(&tree, inner, "click", true), vec![inner]);
        assert_eq!(resolver.handlers_for(&tree, inner, "click", false), vec![inner, outer]);
    }

    #[test]
    fn test_focus_does_not_bubble() {
        let (tree, outer, inner) = nested();
        let mut resolver = TriggerResolver::new();
        resolver.bind(&tree, outer, &directives(Some("focus")));
        assert!(resolver.handlers_for(&tree, inner, "focus", true).is_empty());
        assert_eq!(resolver.handlers_for(&tree, outer, "focus", true), vec![outer]);
    }

    #[test]
    fn test_once_listener_removed_not_rebound() {
        let (tree, _, inner) = nested();
        let mut resolver = TriggerResolver::new();
        resolver.bind(&tree, inner, &directives(Some("click once")));
        assert_eq!(resolver.handlers_for(&tree, inner, "click", true), vec![inner]);
        assert!(resolver.handlers_for(&tree, inner, "click", true).is_empty());
        assert!(resolver.bind(&tree, inner, &directives(Some("click once"))).is_empty());
    }

    #[test]
    fn test_unbind_subtree() {
        let (tree, outer, inner) = nested();
        let mut resolver = TriggerResolver::new();
        resolver.bind(&tree, outer, &directives(None));
        resolver.bind(&tree, inner, &directives(Some("click, change")));
        resolver.unbind_subtree(&tree, outer);
        assert_eq!(resolver.listener_count(), 0);
        assert!(!resolver.is_bound(inner));
        assert!(resolver.events(inner).is_empty());
    }

    #[test]
    fn test_is_bound_per_element() {
        let (tree, outer, inner) = nested();
        let mut resolver = TriggerResolver::new();
        resolver.bind(&tree, inner, &directives(Some("click, change")));
        assert!(resolver.is_bound(inner));
        assert!(!resolver.is_bound(outer));

        resolver.unbind_subtree(&tree, inner);
        assert!(!resolver.is_bound(inner));
        assert_eq!(resolver.bind(&tree, inner, &directives(Some("change"))).new_events, vec!["change".to_string()]);
    }
}
