//! Engine
//!
//! Owns the document and drives the pipeline: events in, requests out,
//! completions back in, swaps applied, new markup activated.
//!
//! Everything runs on the caller's thread. The only suspension point is the
//! transport: `trigger` returns as soon as requests are issued, and `pump`
//! applies whatever has completed since.

use std::time::Duration;

use hx_dom::{Document, NodeId};
use hx_net::{Completion, RequestId, Transport};

use crate::{
    Activation, Activator, AttributeReader, EngineConfig, EngineError, ErrorReporter, Exchange,
    HxAttributeReader, RequestDispatcher, ResponseInterpreter, SwapDecision, SwapEngine, TracingReporter,
    TriggerResolver,
};

/// Where an element stands in the exchange lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Connected, no listeners
    Unbound,
    /// Bound, nothing outstanding
    Idle,
    /// Outstanding exchanges started by this element
    Pending(usize),
    /// Not reachable from the document root
    Detached,
}

/// Hypermedia exchange engine over one document
pub struct Engine {
    document: Document,
    config: EngineConfig,
    reader: Box<dyn AttributeReader>,
    triggers: TriggerResolver,
    dispatcher: RequestDispatcher,
    transport: Box<dyn Transport>,
    reporter: Box<dyn ErrorReporter>,
}

impl Engine {
    /// Engine with the default configuration. The document is not activated
    /// until [`Engine::process_document`] is called.
    pub fn new(document: Document, transport: impl Transport + 'static) -> Self {
        Self::with_config(document, transport, EngineConfig::default())
    }

    pub fn with_config(document: Document, transport: impl Transport + 'static, config: EngineConfig) -> Self {
        Self {
            document,
            reader: Box::new(HxAttributeReader::new(&config)),
            config,
            triggers: TriggerResolver::new(),
            dispatcher: RequestDispatcher::new(),
            transport: Box::new(transport),
            reporter: Box::new(TracingReporter),
        }
    }

    /// Replace the error reporter
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Replace the attribute reader
    pub fn with_reader(mut self, reader: impl AttributeReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    // ---- Activation ----

    /// Bind every eligible element under `root` (included) and fire due `load` triggers
    pub fn process(&mut self, root: NodeId) -> Result<Activation, EngineError> {
        if self.document.tree().get(root).is_none() {
            return Err(EngineError::UnknownNode(root));
        }
        let activation = Activator::activate(self.document.tree(), root, &*self.reader, &mut self.triggers);
        for &element in &activation.load_fired {
            self.dispatch(element);
        }
        Ok(activation)
    }

    /// Activate the whole document
    pub fn process_document(&mut self) -> Activation {
        let root = self.document.tree().root();
        self.process(root).unwrap_or_default()
    }

    /// Parse `markup`, append it under `parent` and activate the new nodes
    pub fn append_html(&mut self, parent: NodeId, markup: &str) -> Result<Vec<NodeId>, EngineError> {
        if self.document.tree().get(parent).is_none() {
            return Err(EngineError::UnknownNode(parent));
        }
        let nodes = hx_html::parse_fragment(self.document.tree_mut(), markup);
        for &node in &nodes {
            self.document.tree_mut().append_child(parent, node)?;
        }
        for &node in &nodes {
            self.process(node)?;
        }
        Ok(nodes)
    }

    // ---- Events ----

    /// Fire `event` at `target`. Returns the requests it issued.
    pub fn trigger(&mut self, target: NodeId, event: &str) -> Vec<RequestId> {
        if !self.document.contains(target) {
            tracing::debug!("Ignoring {} on detached {}", event, target);
            return Vec::new();
        }
        // Trigger specs are stored lowercased
        let event = event.to_ascii_lowercase();
        let handlers = self
            .triggers
            .handlers_for(self.document.tree(), target, &event, self.config.consume_events);
        handlers.into_iter().filter_map(|element| self.dispatch(element)).collect()
    }

    pub fn click(&mut self, target: NodeId) -> Vec<RequestId> {
        self.trigger(target, "click")
    }

    pub fn focus(&mut self, target: NodeId) -> Vec<RequestId> {
        self.trigger(target, "focus")
    }

    pub fn change(&mut self, target: NodeId) -> Vec<RequestId> {
        self.trigger(target, "change")
    }

    pub fn submit(&mut self, target: NodeId) -> Vec<RequestId> {
        self.trigger(target, "submit")
    }

    // ---- Exchanges ----

    /// Issue `element`'s request directly, bypassing triggers
    pub fn dispatch(&mut self, element: NodeId) -> Option<RequestId> {
        self.dispatcher.dispatch(
            &self.document,
            element,
            &*self.reader,
            &mut *self.transport,
            &self.config,
        )
    }

    /// Apply every completion the transport has ready. Returns how many.
    pub fn pump(&mut self) -> usize {
        let completions = self.transport.poll();
        self.apply_all(completions)
    }

    /// Like [`Engine::pump`], but blocks up to `timeout` for the first completion
    pub fn pump_wait(&mut self, timeout: Duration) -> usize {
        let completions = self.transport.wait(timeout);
        self.apply_all(completions)
    }

    fn apply_all(&mut self, completions: Vec<Completion>) -> usize {
        let count = completions.len();
        for completion in completions {
            self.handle_completion(completion);
        }
        count
    }

    /// Interpret one completion and apply it to the current document.
    /// Returns the finished exchange with its final status, or `None` if the
    /// id belongs to no in-flight exchange.
    pub fn handle_completion(&mut self, completion: Completion) -> Option<Exchange> {
        let Some(mut exchange) = self.dispatcher.complete(completion.id) else {
            tracing::debug!("Dropping completion for unknown {}", completion.id);
            return None;
        };

        let decision = ResponseInterpreter::interpret(completion.result);
        exchange.status = decision.status();
        match decision {
            SwapDecision::Swap(markup) => self.swap(&exchange, &markup),
            SwapDecision::NoSwap => {
                tracing::debug!("{} returned no content", exchange.id);
            }
            SwapDecision::Fail(error) => {
                self.reporter.report(exchange.origin, &error);
            }
        }
        Some(exchange)
    }

    fn swap(&mut self, exchange: &Exchange, markup: &str) {
        if !self.document.contains(exchange.origin) {
            tracing::debug!("Discarding {}: origin {} detached", exchange.id, exchange.origin);
            return;
        }
        let Some(target) = SwapEngine::resolve_target(&self.document, exchange.origin, &exchange.target) else {
            tracing::debug!("Discarding {}: target {:?} not in document", exchange.id, exchange.target);
            return;
        };

        let result = match SwapEngine::apply(&mut self.document, target, markup, exchange.swap) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("Swap for {} failed: {}", exchange.id, err);
                return;
            }
        };

        for &removed in &result.removed {
            self.triggers.unbind_subtree(self.document.tree(), removed);
        }
        for node in result.inserted {
            if let Err(err) = self.process(node) {
                tracing::warn!("Activating {} failed: {}", node, err);
            }
        }
    }

    // ---- Queries ----

    pub fn state(&self, element: NodeId) -> ElementState {
        if !self.document.contains(element) {
            return ElementState::Detached;
        }
        match self.dispatcher.pending_for(element) {
            0 if self.triggers.is_bound(element) => ElementState::Idle,
            0 => ElementState::Unbound,
            n => ElementState::Pending(n),
        }
    }

    /// Exchanges issued and not yet completed
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    pub fn exchange(&self, id: RequestId) -> Option<&Exchange> {
        self.dispatcher.get(id)
    }

    pub fn triggers(&self) -> &TriggerResolver {
        &self.triggers
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        hx_html::get_inner_html(self.document.tree(), node)
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        hx_html::get_outer_html(self.document.tree(), node)
    }

    pub fn text(&self, node: NodeId) -> String {
        self.document.text_content(node)
    }

    /// Connected element with this id
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access. Nodes added here are inert until processed.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("nodes", &self.document.tree().len())
            .field("listeners", &self.triggers.listener_count())
            .field("in_flight", &self.dispatcher.in_flight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hx_net::{FakeServer, Method};

    fn engine_with(markup: &str) -> (Engine, FakeServer) {
        let server = FakeServer::new();
        let mut engine = Engine::new(Document::default(), server.clone());
        let body = engine.document().body();
        engine.append_html(body, markup).unwrap();
        (engine, server)
    }

    #[test]
    fn test_click_swaps_inner_html() {
        let (mut engine, server) = engine_with(r#"<button id="b1" hx-get="/test">Click Me!</button>"#);
        server.respond_with(Method::Get, "/test", "Clicked!");
        let b1 = engine.by_id("b1").unwrap();

        assert_eq!(engine.click(b1).len(), 1);
        assert_eq!(engine.state(b1), ElementState::Pending(1));
        server.respond();
        assert_eq!(engine.pump(), 1);
        assert_eq!(engine.inner_html(b1), "Clicked!");
        assert_eq!(engine.state(b1), ElementState::Idle);
    }

    #[test]
    fn test_states() {
        let (mut engine, _server) = engine_with(r#"<p id="p1">x</p><div id="d1" hx-get="/x"></div>"#);
        let p1 = engine.by_id("p1").unwrap();
        let d1 = engine.by_id("d1").unwrap();
        assert_eq!(engine.state(p1), ElementState::Unbound);
        assert_eq!(engine.state(d1), ElementState::Idle);
        engine.document_mut().tree_mut().detach(d1);
        assert_eq!(engine.state(d1), ElementState::Detached);
        assert!(engine.click(d1).is_empty());
    }

    #[test]
    fn test_event_name_is_case_insensitive() {
        let (mut engine, server) = engine_with(r#"<input id="i1" hx-get="/f" hx-trigger="focus">"#);
        server.respond_with(Method::Get, "/f", "");
        let i1 = engine.by_id("i1").unwrap();

        assert_eq!(engine.trigger(i1, "Focus").len(), 1);
        assert_eq!(engine.trigger(i1, "FOCUS").len(), 1);
        assert_eq!(server.request_count(), 2);
    }

    #[test]
    fn test_unknown_node_errors() {
        let server = FakeServer::new();
        let mut engine = Engine::new(Document::default(), server);
        let ghost = engine.document().body();
        engine.document_mut().tree_mut().detach(ghost);
        assert!(engine.process(ghost).is_ok(), "detached but existing nodes can be processed");
        assert!(matches!(engine.process(NodeId::NONE), Err(EngineError::UnknownNode(_))));
    }

    #[test]
    fn test_unknown_completion_ignored() {
        let (mut engine, _server) = engine_with("<div></div>");
        let completion = Completion {
            id: RequestId(99),
            result: Ok(hx_net::Response::ok("x")),
        };
        assert_eq!(engine.handle_completion(completion), None);
    }

    #[test]
    fn test_completion_records_final_status() {
        let (mut engine, _server) = engine_with(r#"<div id="d1" hx-get="/x">x</div>"#);
        let d1 = engine.by_id("d1").unwrap();
        let id = engine.dispatch(d1).unwrap();
        let completion = Completion {
            id,
            result: Ok(hx_net::Response::new(500, "boom")),
        };
        let finished = engine.handle_completion(completion).unwrap();
        assert_eq!(finished.status, crate::ExchangeStatus::Failed);
        assert_eq!(engine.inner_html(d1), "x");
    }
}
