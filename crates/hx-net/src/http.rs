//! HTTP Transport
//!
//! Plain `http://` HTTP/1.1 over smol TCP streams. Each request runs as a task
//! on smol's global executor; completions come back through a channel that
//! `poll` drains on the caller's thread.

use std::time::Duration;

use smol::channel::{Receiver, Sender};
use smol::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;

use crate::http1::{decode_response, encode_request};
use crate::{Completion, NetError, Request, RequestId, Response, Transport};

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User agent string
    pub user_agent: String,
    /// Base URL relative request URLs are resolved against
    pub base_url: Option<String>,
    /// Extra headers sent with every request
    pub default_headers: Vec<(String, String)>,
    /// Largest response (head and body) read from the wire
    pub max_response_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("hx/{}", env!("CARGO_PKG_VERSION")),
            base_url: None,
            default_headers: Vec::new(),
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Network transport backed by smol
pub struct HttpTransport {
    config: HttpConfig,
    base: Option<Url>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    in_flight: usize,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self, NetError> {
        let base = config
            .base_url
            .as_deref()
            .map(|b| Url::parse(b).map_err(|e| NetError::InvalidUrl(format!("{}: {}", b, e))))
            .transpose()?;
        let (sender, receiver) = smol::channel::unbounded();
        Ok(Self {
            config,
            base,
            sender,
            receiver,
            in_flight: 0,
        })
    }

    /// Resolve a request URL against the configured base
    pub fn resolve(&self, url: &str) -> Result<Url, NetError> {
        let parsed = match &self.base {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        parsed.map_err(|e| NetError::InvalidUrl(format!("{}: {}", url, e)))
    }
}

impl Transport for HttpTransport {
    fn issue(&mut self, id: RequestId, request: Request) {
        self.in_flight += 1;
        let sender = self.sender.clone();

        let url = match self.resolve(&request.url) {
            Ok(url) => url,
            Err(err) => {
                // Still reported through poll so the caller sees one completion per issue
                let _ = sender.try_send(Completion { id, result: Err(err) });
                return;
            }
        };

        tracing::info!("HTTP {} {}", request.method, url);
        let config = self.config.clone();

        smol::spawn(async move {
            let result = execute(&url, &request, &config).await;
            if let Err(err) = &result {
                tracing::debug!("HTTP {} {} failed: {}", request.method, url, err);
            }
            if sender.send(Completion { id, result }).await.is_err() {
                tracing::debug!("Transport dropped before {} completed", id);
            }
        })
        .detach();
    }

    fn poll(&mut self) -> Vec<Completion> {
        let mut out = Vec::new();
        while let Ok(completion) = self.receiver.try_recv() {
            out.push(completion);
        }
        self.in_flight = self.in_flight.saturating_sub(out.len());
        out
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn wait(&mut self, timeout: Duration) -> Vec<Completion> {
        if self.in_flight == 0 {
            return Vec::new();
        }

        let receiver = self.receiver.clone();
        let first = smol::block_on(smol::future::or(
            async move { receiver.recv().await.ok() },
            async move {
                smol::Timer::after(timeout).await;
                None
            },
        ));

        let mut out: Vec<Completion> = first.into_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(out.len());
        out.extend(self.poll());
        out
    }
}

async fn execute(url: &Url, request: &Request, config: &HttpConfig) -> Result<Response, NetError> {
    if url.scheme() != "http" {
        return Err(NetError::UnsupportedScheme(url.scheme().to_string()));
    }
    let host = url
        .host_str()
        .ok_or_else(|| NetError::InvalidUrl(url.to_string()))?;
    let port = url.port_or_known_default().unwrap_or(80);

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let host_header = match url.port() {
        Some(p) => format!("{}:{}", host, p),
        None => host.to_string(),
    };

    let fixed = [
        ("Host", host_header.as_str()),
        ("User-Agent", config.user_agent.as_str()),
        ("Connection", "close"),
    ];
    let extra = config
        .default_headers
        .iter()
        .chain(&request.headers)
        .map(|(name, value)| (name.as_str(), value.as_str()));
    let wire = encode_request(request.method, &target, fixed.into_iter().chain(extra), request.body.as_deref());

    let mut stream = smol::net::TcpStream::connect(format!("{}:{}", host, port)).await?;
    stream.write_all(&wire).await?;
    stream.flush().await?;

    // One byte past the limit tells an oversized response from one that fits exactly
    let limit = config.max_response_bytes;
    let mut raw = Vec::new();
    stream.take(limit.saturating_add(1) as u64).read_to_end(&mut raw).await?;
    if raw.len() > limit {
        return Err(NetError::Protocol(format!("response exceeds {} bytes", limit)));
    }

    let parsed = decode_response(&raw)?;
    Ok(Response {
        status: parsed.status,
        headers: parsed.headers,
        body: String::from_utf8_lossy(&parsed.body).into_owned(),
    })
}
