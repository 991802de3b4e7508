//! Scripted in-memory transport
//!
//! Requests are queued when issued and only resolved when the owner says so,
//! which makes delivery order fully controllable. Routes are matched on
//! (method, url); later routes shadow earlier ones and unmatched requests get
//! a 404. Clones share state.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::{Completion, Method, NetError, Request, RequestId, Response, Transport};

type Handler = Box<dyn FnMut(&Request) -> Response>;

enum Responder {
    Fixed(Response),
    Handler(Handler),
}

struct Route {
    method: Method,
    url: String,
    responder: Responder,
}

#[derive(Default)]
struct Inner {
    routes: Vec<Route>,
    pending: VecDeque<(RequestId, Request)>,
    ready: Vec<Completion>,
    log: Vec<Request>,
}

impl Inner {
    fn resolve(&mut self, request: &Request) -> Response {
        let route = self
            .routes
            .iter_mut()
            .rev()
            .find(|r| r.method == request.method && r.url == request.url);

        match route.map(|r| &mut r.responder) {
            Some(Responder::Fixed(response)) => response.clone(),
            Some(Responder::Handler(handler)) => handler(request),
            None => Response::new(404, ""),
        }
    }

    fn take_pending(&mut self, id: RequestId) -> Option<Request> {
        let pos = self.pending.iter().position(|(pid, _)| *pid == id)?;
        self.pending.remove(pos).map(|(_, req)| req)
    }
}

/// Fake server transport
#[derive(Clone, Default)]
pub struct FakeServer {
    inner: Rc<RefCell<Inner>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with 200 and `body`
    pub fn respond_with(&self, method: Method, url: &str, body: &str) {
        self.add_route(method, url, Responder::Fixed(Response::ok(body)));
    }

    /// Answer `method url` with a fixed status and body
    pub fn respond_with_status(&self, method: Method, url: &str, status: u16, body: &str) {
        self.add_route(method, url, Responder::Fixed(Response::new(status, body)));
    }

    /// Answer `method url` by calling `handler` for each request.
    /// The handler must not call back into this server.
    pub fn respond_with_fn<F>(&self, method: Method, url: &str, handler: F)
    where
        F: FnMut(&Request) -> Response + 'static,
    {
        self.add_route(method, url, Responder::Handler(Box::new(handler)));
    }

    fn add_route(&self, method: Method, url: &str, responder: Responder) {
        self.inner.borrow_mut().routes.push(Route {
            method,
            url: url.to_string(),
            responder,
        });
    }

    /// Resolve every pending request, in issue order. Returns how many.
    pub fn respond(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        let pending: Vec<_> = inner.pending.drain(..).collect();
        let count = pending.len();
        for (id, request) in pending {
            let response = inner.resolve(&request);
            tracing::debug!("FakeServer {} {} {} -> {}", id, request.method, request.url, response.status);
            inner.ready.push(Completion { id, result: Ok(response) });
        }
        count
    }

    /// Resolve one pending request. Returns false if it is not pending.
    pub fn respond_to(&self, id: RequestId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(request) = inner.take_pending(id) else {
            return false;
        };
        let response = inner.resolve(&request);
        inner.ready.push(Completion { id, result: Ok(response) });
        true
    }

    /// Fail one pending request with a network error
    pub fn fail(&self, id: RequestId, reason: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.take_pending(id).is_none() {
            return false;
        }
        inner.ready.push(Completion {
            id,
            result: Err(NetError::Network(reason.to_string())),
        });
        true
    }

    /// Ids of requests issued but not yet resolved, in issue order
    pub fn pending(&self) -> Vec<RequestId> {
        self.inner.borrow().pending.iter().map(|(id, _)| *id).collect()
    }

    /// Every request ever issued, in issue order
    pub fn requests(&self) -> Vec<Request> {
        self.inner.borrow().log.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.borrow().log.len()
    }
}

impl Transport for FakeServer {
    fn issue(&mut self, id: RequestId, request: Request) {
        let mut inner = self.inner.borrow_mut();
        inner.log.push(request.clone());
        inner.pending.push_back((id, request));
    }

    fn poll(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.inner.borrow_mut().ready)
    }

    fn in_flight(&self) -> usize {
        let inner = self.inner.borrow();
        inner.pending.len() + inner.ready.len()
    }
}

impl std::fmt::Debug for FakeServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FakeServer")
            .field("routes", &inner.routes.len())
            .field("pending", &inner.pending.len())
            .field("ready", &inner.ready.len())
            .finish()
    }
}
