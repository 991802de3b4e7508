//! Comprehensive tests for hx-net
//!
//! HttpTransport against a throwaway local server, and FakeServer through the
//! Transport trait object.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use hx_net::{Completion, FakeServer, HttpConfig, HttpTransport, Method, NetError, Request, RequestId, Transport};

/// Serve one connection with `response`, handing back the request head
fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        head
    });
    (base, handle)
}

fn wait_for_one(transport: &mut dyn Transport) -> Completion {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let mut done = transport.wait(Duration::from_millis(200));
        if let Some(completion) = done.pop() {
            return completion;
        }
        assert!(Instant::now() < deadline, "no completion before deadline");
    }
}

#[test]
fn test_http_round_trip() {
    let (base, server) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 8\r\nX-Test: yes\r\n\r\nClicked!");
    let mut transport = HttpTransport::new(HttpConfig {
        base_url: Some(base),
        ..Default::default()
    })
    .unwrap();

    transport.issue(
        RequestId(1),
        Request::new(Method::Post, "/test?x=1").with_header("HX-Request", "true"),
    );
    assert_eq!(transport.in_flight(), 1);

    let completion = wait_for_one(&mut transport);
    assert_eq!(completion.id, RequestId(1));
    let response = completion.result.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "Clicked!");
    assert_eq!(response.header("x-test"), Some("yes"));
    assert_eq!(transport.in_flight(), 0);

    let head = server.join().unwrap();
    assert!(head.starts_with("POST /test?x=1 HTTP/1.1\r\n"), "{}", head);
    assert!(head.contains("HX-Request: true"));
    assert!(head.contains("Connection: close"));
}

#[test]
fn test_http_error_status_is_a_response() {
    let (base, _server) = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\n\r\nboom");
    let mut transport = HttpTransport::new(HttpConfig {
        base_url: Some(base),
        ..Default::default()
    })
    .unwrap();
    transport.issue(RequestId(2), Request::get("/fail"));
    let response = wait_for_one(&mut transport).result.unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
}

#[test]
fn test_oversized_response_is_protocol_error() {
    let (base, _server) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 40\r\n\r\n0123456789012345678901234567890123456789");
    let mut transport = HttpTransport::new(HttpConfig {
        base_url: Some(base),
        max_response_bytes: 32,
        ..Default::default()
    })
    .unwrap();
    transport.issue(RequestId(4), Request::get("/big"));
    let completion = wait_for_one(&mut transport);
    assert!(matches!(completion.result, Err(NetError::Protocol(_))));
    assert_eq!(transport.in_flight(), 0);
}

#[test]
fn test_lying_content_length_is_protocol_error() {
    let (base, _server) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 18446744073709551615\r\n\r\nshort");
    let mut transport = HttpTransport::new(HttpConfig {
        base_url: Some(base),
        ..Default::default()
    })
    .unwrap();
    transport.issue(RequestId(5), Request::get("/lie"));
    let completion = wait_for_one(&mut transport);
    assert!(matches!(completion.result, Err(NetError::Protocol(_))));
}

#[test]
fn test_connection_refused_is_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut transport = HttpTransport::new(HttpConfig::default()).unwrap();
    transport.issue(RequestId(3), Request::get(&format!("http://127.0.0.1:{}/", port)));
    let completion = wait_for_one(&mut transport);
    assert!(matches!(completion.result, Err(NetError::Io(_))));
}

#[test]
fn test_fake_server_as_boxed_transport() {
    let server = FakeServer::new();
    server.respond_with(Method::Get, "/a", "A");
    let mut transport: Box<dyn Transport> = Box::new(server.clone());

    transport.issue(RequestId(1), Request::get("/a"));
    transport.issue(RequestId(2), Request::get("/b"));
    assert_eq!(transport.in_flight(), 2);
    assert!(transport.wait(Duration::from_millis(1)).is_empty());

    assert!(server.respond_to(RequestId(2)));
    let done = transport.poll();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].result.as_ref().unwrap().status, 404);

    server.respond();
    let done = transport.poll();
    assert_eq!(done[0].result.as_ref().unwrap().body, "A");
    assert_eq!(transport.in_flight(), 0);
}
