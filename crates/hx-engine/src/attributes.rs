//! Attribute Reader
//!
//! Reads an element's request directives into a typed [`Directives`] value.
//! Invalid or missing optional values fall back to defaults; only a missing
//! URL makes an element inert.

use hx_dom::{DomTree, NodeId};
use hx_net::Method;

use crate::{EngineConfig, SwapMode};

/// Where a response is swapped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetSpec {
    /// The originating element
    #[default]
    This,
    /// First document element matching a selector
    Selector(String),
}

impl TargetSpec {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "this" => TargetSpec::This,
            selector => TargetSpec::Selector(selector.to_string()),
        }
    }
}

/// Everything the pipeline needs to know about one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    pub method: Method,
    pub url: String,
    /// Raw trigger spec; interpreted by the trigger resolver
    pub trigger: Option<String>,
    pub swap: SwapMode,
    pub target: TargetSpec,
}

/// Reads directives off an element
pub trait AttributeReader {
    /// `None` when the element carries no request URL
    fn read(&self, tree: &DomTree, element: NodeId) -> Option<Directives>;
}

/// Verb attributes, in precedence order
const VERBS: &[(Method, &str)] = &[
    (Method::Get, "get"),
    (Method::Post, "post"),
    (Method::Put, "put"),
    (Method::Patch, "patch"),
    (Method::Delete, "delete"),
];

/// Reader for prefixed attributes (`hx-get`, `hx-trigger`, `hx-swap`, `hx-target`)
#[derive(Debug, Clone)]
pub struct HxAttributeReader {
    verbs: Vec<(Method, String)>,
    trigger_attr: String,
    swap_attr: String,
    target_attr: String,
    default_swap: SwapMode,
}

impl HxAttributeReader {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            verbs: VERBS.iter().map(|(m, v)| (*m, config.attr(v))).collect(),
            trigger_attr: config.attr("trigger"),
            swap_attr: config.attr("swap"),
            target_attr: config.attr("target"),
            default_swap: config.default_swap,
        }
    }
}

impl Default for HxAttributeReader {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl AttributeReader for HxAttributeReader {
    fn read(&self, tree: &DomTree, element: NodeId) -> Option<Directives> {
        let (method, url) = self
            .verbs
            .iter()
            .find_map(|(method, attr)| tree.attribute(element, attr).map(|url| (*method, url)))?;

        let swap = match tree.attribute(element, &self.swap_attr) {
            Some(raw) => SwapMode::parse(raw).unwrap_or_else(|| {
                tracing::debug!("Unknown swap mode {:?} on {}, using {}", raw, element, self.default_swap);
                self.default_swap
            }),
            None => self.default_swap,
        };

        Some(Directives {
            method,
            url: url.to_string(),
            trigger: tree.attribute(element, &self.trigger_attr).map(str::to_string),
            swap,
            target: tree
                .attribute(element, &self.target_attr)
                .map(TargetSpec::parse)
                .unwrap_or_default(),
        })
    }
}
