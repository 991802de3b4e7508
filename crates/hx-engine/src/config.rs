//! Engine Configuration

use serde::Deserialize;

use crate::{EngineError, SwapMode};

/// Engine configuration options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix of every engine attribute (`hx-get`, `hx-swap`, ...)
    pub attribute_prefix: String,

    /// Swap mode when an element declares none (or an unknown one)
    pub default_swap: SwapMode,

    /// Attach `HX-Request`/`HX-Trigger`/`HX-Target` headers to requests
    pub send_headers: bool,

    /// A handled event stops propagating to ancestors
    pub consume_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            attribute_prefix: "hx-".to_string(),
            default_swap: SwapMode::InnerHtml,
            send_headers: true,
            consume_events: true,
        }
    }
}

impl EngineConfig {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Full attribute name for a directive (`"swap"` → `"hx-swap"`)
    pub fn attr(&self, name: &str) -> String {
        format!("{}{}", self.attribute_prefix, name)
    }
}
