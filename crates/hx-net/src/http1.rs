//! HTTP/1.1 Wire Format
//!
//! Client side only: [`encode_request`] writes one request head and body,
//! [`decode_response`] reads one complete, already-buffered response. Every
//! length the peer announces is checked against the bytes actually present
//! before it is used.

use crate::{Method, NetError};

/// Serialize a request. `target` is the origin-form path plus query.
pub fn encode_request<'a>(
    method: Method,
    target: &str,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    body: Option<&str>,
) -> Vec<u8> {
    let mut head = format!("{} {} HTTP/1.1\r\n", method, target);
    for (name, value) in headers {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    if let Some(body) = body {
        head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    head.push_str("\r\n");

    let mut out = head.into_bytes();
    if let Some(body) = body {
        out.extend_from_slice(body.as_bytes());
    }
    out
}

/// Status, headers and decoded body of one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl WireResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn protocol(msg: impl Into<String>) -> NetError {
    NetError::Protocol(msg.into())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Decode a response read until the peer closed the connection
pub fn decode_response(raw: &[u8]) -> Result<WireResponse, NetError> {
    let head_end = find(raw, b"\r\n\r\n").ok_or_else(|| protocol("response head is incomplete"))?;
    let head = String::from_utf8_lossy(&raw[..head_end]);
    let rest = &raw[head_end + 4..];

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default();
    let mut parts = status_line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/1.") {
        return Err(protocol(format!("bad status line: {}", status_line)));
    }
    let status = parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| protocol(format!("bad status code: {}", status_line)))?;

    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();

    let mut response = WireResponse {
        status,
        headers,
        body: Vec::new(),
    };

    let chunked = response
        .header("transfer-encoding")
        .is_some_and(|te| te.to_ascii_lowercase().contains("chunked"));
    response.body = if chunked {
        decode_chunked(rest)?
    } else if let Some(length) = response.header("content-length") {
        let length: usize = length
            .parse()
            .map_err(|_| protocol(format!("bad Content-Length: {}", length)))?;
        if length > rest.len() {
            return Err(protocol(format!(
                "Content-Length {} but only {} bytes received",
                length,
                rest.len()
            )));
        }
        rest[..length].to_vec()
    } else {
        rest.to_vec()
    };

    Ok(response)
}

fn decode_chunked(mut rest: &[u8]) -> Result<Vec<u8>, NetError> {
    let mut body = Vec::new();
    loop {
        let line_end = find(rest, b"\r\n").ok_or_else(|| protocol("chunk size line is incomplete"))?;
        let line = String::from_utf8_lossy(&rest[..line_end]);
        let digits = line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(digits, 16).map_err(|_| protocol(format!("bad chunk size: {}", digits)))?;
        rest = &rest[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        if size > rest.len() {
            return Err(protocol(format!("chunk of {} bytes but only {} received", size, rest.len())));
        }
        body.extend_from_slice(&rest[..size]);
        rest = rest[size..].strip_prefix(b"\r\n").ok_or_else(|| protocol("chunk not terminated"))?;
    }
}
