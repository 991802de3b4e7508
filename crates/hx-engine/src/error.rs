//! Engine errors

use hx_dom::{DomError, NodeId};

/// Errors returned from engine entry points
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Node {0} does not exist")]
    UnknownNode(NodeId),
}

/// Why an exchange failed. Handed to the error reporter, never returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl ExchangeError {
    /// Status code for HTTP errors, `None` for network failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::HttpError { status } => Some(*status),
            ExchangeError::NetworkFailure(_) => None,
        }
    }
}
