//! Request Dispatch
//!
//! Turns a fired element into one [`Exchange`] and hands its request to the
//! transport. Dispatch never touches the DOM.

use std::collections::HashMap;

use hx_dom::{Document, NodeId};
use hx_net::{Method, Request, RequestId, Transport};

use crate::{AttributeReader, EngineConfig, SwapEngine, SwapMode, TargetSpec};

/// Lifecycle of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    Pending,
    Succeeded,
    NoContent,
    Failed,
}

/// One request/response cycle started by one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub id: RequestId,
    pub origin: NodeId,
    pub method: Method,
    pub url: String,
    /// Swap mode as declared when the request was issued
    pub swap: SwapMode,
    /// Target spec as declared when the request was issued; resolved at completion
    pub target: TargetSpec,
    /// `Pending` while in flight; the outcome once completed
    pub status: ExchangeStatus,
}

/// Issues exchanges and tracks the ones still in flight
#[derive(Debug)]
pub struct RequestDispatcher {
    next_id: u64,
    in_flight: HashMap<RequestId, Exchange>,
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestDispatcher {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            in_flight: HashMap::new(),
        }
    }

    /// Issue a request for `element`. `None` when the element is inert.
    pub fn dispatch(
        &mut self,
        doc: &Document,
        element: NodeId,
        reader: &dyn AttributeReader,
        transport: &mut dyn Transport,
        config: &EngineConfig,
    ) -> Option<RequestId> {
        let directives = reader.read(doc.tree(), element)?;

        let id = RequestId(self.next_id);
        self.next_id += 1;

        let mut request = Request::new(directives.method, &directives.url);
        if config.send_headers {
            request = request.with_header("HX-Request", "true");
            if let Some(origin_id) = doc.tree().attribute(element, "id") {
                request = request.with_header("HX-Trigger", origin_id);
            }
            let target_id = SwapEngine::resolve_target(doc, element, &directives.target)
                .and_then(|target| doc.tree().attribute(target, "id"));
            if let Some(target_id) = target_id {
                request = request.with_header("HX-Target", target_id);
            }
        }

        tracing::info!("{} {} {} from {}", id, directives.method, directives.url, element);
        transport.issue(id, request);

        self.in_flight.insert(
            id,
            Exchange {
                id,
                origin: element,
                method: directives.method,
                url: directives.url,
                swap: directives.swap,
                target: directives.target,
                status: ExchangeStatus::Pending,
            },
        );
        Some(id)
    }

    /// Take an exchange out of flight. `None` for ids this dispatcher never
    /// issued or already completed.
    pub fn complete(&mut self, id: RequestId) -> Option<Exchange> {
        self.in_flight.remove(&id)
    }

    pub fn get(&self, id: RequestId) -> Option<&Exchange> {
        self.in_flight.get(&id)
    }

    /// Outstanding exchanges started by `element`
    pub fn pending_for(&self, element: NodeId) -> usize {
        self.in_flight.values().filter(|ex| ex.origin == element).count()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
