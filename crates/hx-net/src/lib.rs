//! hx Networking
//!
//! The transport boundary of the exchange engine. A [`Transport`] accepts
//! requests tagged with a [`RequestId`] and later hands back [`Completion`]s;
//! issuing never blocks and never touches the DOM.

mod fake;
mod http;
mod http1;

pub use fake::FakeServer;
pub use http::{HttpConfig, HttpTransport};
pub use http1::{WireResponse, decode_response, encode_request};

use std::time::Duration;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Parse a method name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request handed to a transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP Response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// 200 with a body
    pub fn ok(body: &str) -> Self {
        Self::new(200, body)
    }

    /// Header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifies one issued request until its completion is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Outcome of one issued request
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub result: Result<Response, NetError>,
}

/// Request transport.
///
/// `issue` must return immediately; results surface later through `poll`
/// in whatever order the transport completes them.
pub trait Transport {
    /// Start a request
    fn issue(&mut self, id: RequestId, request: Request);

    /// Take every completion that is ready, in delivery order
    fn poll(&mut self) -> Vec<Completion>;

    /// Requests issued but not yet handed back by `poll`
    fn in_flight(&self) -> usize;

    /// Block up to `timeout` for at least one completion.
    /// Transports without background work just poll.
    fn wait(&mut self, timeout: Duration) -> Vec<Completion> {
        let _ = timeout;
        self.poll()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn issue(&mut self, id: RequestId, request: Request) {
        (**self).issue(id, request)
    }

    fn poll(&mut self) -> Vec<Completion> {
        (**self).poll()
    }

    fn in_flight(&self) -> usize {
        (**self).in_flight()
    }

    fn wait(&mut self, timeout: Duration) -> Vec<Completion> {
        (**self).wait(timeout)
    }
}
