//! Integration tests for the API client against a local mock server.
//!
//! Unit tests for URL joining, body classification, and error message
//! extraction live in each module's `#[cfg(test)]` block. These tests
//! exercise the full request path: a `tiny_http` server bound to an
//! ephemeral port answers exactly one request per test.

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use jupysec::api::{ApiClient, ApiError, ParsedBody, RequestOptions, ServerSettings};
use serde_json::json;
use tiny_http::{Header, Response, Server};

// ---------------------------------------------------------------------------
// Mock server scaffolding
// ---------------------------------------------------------------------------

struct MockServer {
    base_url: String,
    handle: thread::JoinHandle<()>,
}

/// Start a one-shot server on an ephemeral port; `handler` answers the
/// single expected request.
fn spawn_server<F>(handler: F) -> MockServer
where
    F: FnOnce(tiny_http::Request) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind mock server");
    let addr = server.server_addr().to_ip().expect("ip listen address");
    let base_url = format!("http://{addr}/");
    let handle = thread::spawn(move || {
        let request = server.recv().expect("mock server recv");
        handler(request);
    });
    MockServer { base_url, handle }
}

fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(ServerSettings {
        base_url: base_url.to_string(),
        token: None,
        headers: Vec::new(),
    })
}

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// A port with nothing listening on it.
fn dead_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[test]
fn scorecard_update_resolves_parsed_json() {
    let (tx, rx) = mpsc::channel();
    let mock = spawn_server(move |request| {
        tx.send(request.url().to_string()).unwrap();
        let response = Response::from_string(r#"{"status":"ok"}"#).with_header(json_header());
        request.respond(response).unwrap();
    });

    let client = client_for(&mock.base_url);
    let body = client.get("scorecard_update").expect("request should succeed");

    assert_eq!(body, ParsedBody::Json(json!({"status": "ok"})));
    assert_eq!(rx.recv().unwrap(), "/jupysec/scorecard_update");
    mock.handle.join().unwrap();
}

#[test]
fn empty_body_resolves_empty_not_error() {
    let mock = spawn_server(|request| {
        request.respond(Response::from_string("")).unwrap();
    });

    let client = client_for(&mock.base_url);
    let body = client.get("scorecard_update").expect("empty body is fine");

    assert_eq!(body, ParsedBody::Empty);
    mock.handle.join().unwrap();
}

#[test]
fn non_json_body_passes_through_as_raw_text() {
    let mock = spawn_server(|request| {
        request
            .respond(Response::from_string("scorecard queued"))
            .unwrap();
    });

    let client = client_for(&mock.base_url);
    let body = client.get("scorecard_update").expect("non-JSON body is fine");

    assert_eq!(body, ParsedBody::Text("scorecard queued".to_string()));
    mock.handle.join().unwrap();
}

#[test]
fn empty_endpoint_hits_namespace_root() {
    let (tx, rx) = mpsc::channel();
    let mock = spawn_server(move |request| {
        tx.send(request.url().to_string()).unwrap();
        request.respond(Response::from_string("{}")).unwrap();
    });

    let client = client_for(&mock.base_url);
    client.get("").expect("request should succeed");

    assert_eq!(rx.recv().unwrap(), "/jupysec");
    mock.handle.join().unwrap();
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn not_found_rejects_with_message_field() {
    let mock = spawn_server(|request| {
        let response = Response::from_string(r#"{"message":"not found"}"#)
            .with_header(json_header())
            .with_status_code(404);
        request.respond(response).unwrap();
    });

    let client = client_for(&mock.base_url);
    let err = client
        .get("scorecard_update")
        .expect_err("404 must be an error");

    match err {
        ApiError::Response {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("expected response error, got {other:?}"),
    }
    mock.handle.join().unwrap();
}

#[test]
fn error_without_message_field_uses_raw_body() {
    let mock = spawn_server(|request| {
        request
            .respond(Response::from_string("boom").with_status_code(500))
            .unwrap();
    });

    let client = client_for(&mock.base_url);
    let err = client
        .get("scorecard_update")
        .expect_err("500 must be an error");

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "boom");
    mock.handle.join().unwrap();
}

#[test]
fn error_with_empty_body_uses_status_line() {
    let mock = spawn_server(|request| {
        request
            .respond(Response::from_string("").with_status_code(403))
            .unwrap();
    });

    let client = client_for(&mock.base_url);
    let err = client
        .get("scorecard_update")
        .expect_err("403 must be an error");

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.message(), "Invalid response: 403 Forbidden");
    mock.handle.join().unwrap();
}

#[test]
fn transport_failure_rejects_with_network_error() {
    let client = client_for(&format!("http://127.0.0.1:{}/", dead_port()));

    let err = client
        .get("scorecard_update")
        .expect_err("nothing is listening");

    assert!(err.is_network());
    assert_eq!(err.status(), None);
    // The original transport failure stays reachable for diagnostics.
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn transport_failure_on_post_is_also_network_error() {
    let client = client_for(&format!("http://127.0.0.1:{}/", dead_port()));

    let err = client
        .request("hello", &RequestOptions::post(r#"{"name":"George"}"#))
        .expect_err("nothing is listening");

    assert!(err.is_network());
}

// ---------------------------------------------------------------------------
// Ambient context and options
// ---------------------------------------------------------------------------

#[test]
fn token_and_ambient_headers_are_attached() {
    let (tx, rx) = mpsc::channel();
    let mock = spawn_server(move |request| {
        let auth = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Authorization"))
            .map(|h| h.value.as_str().to_string());
        let x_client = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("X-Client"))
            .map(|h| h.value.as_str().to_string());
        tx.send((auth, x_client)).unwrap();
        request.respond(Response::from_string("{}")).unwrap();
    });

    let client = ApiClient::new(ServerSettings {
        base_url: mock.base_url.clone(),
        token: Some("sekrit".to_string()),
        headers: vec![("X-Client".to_string(), "jupysec".to_string())],
    });
    client.get("scorecard_update").expect("request should succeed");

    let (auth, x_client) = rx.recv().unwrap();
    assert_eq!(auth.as_deref(), Some("token sekrit"));
    assert_eq!(x_client.as_deref(), Some("jupysec"));
    mock.handle.join().unwrap();
}

#[test]
fn post_body_is_delivered_verbatim() {
    let (tx, rx) = mpsc::channel();
    let mock = spawn_server(move |mut request| {
        let mut body = String::new();
        request.as_reader().read_to_string(&mut body).unwrap();
        tx.send((request.method().clone(), body)).unwrap();
        let response = Response::from_string(r#"{"greetings":"Hello George, enjoy JupyterLab!"}"#)
            .with_header(json_header());
        request.respond(response).unwrap();
    });

    let client = client_for(&mock.base_url);
    let body = client
        .request("hello", &RequestOptions::post(r#"{"name":"George"}"#))
        .expect("request should succeed");

    let (method, sent) = rx.recv().unwrap();
    assert_eq!(method, tiny_http::Method::Post);
    assert_eq!(sent, r#"{"name":"George"}"#);
    assert_eq!(
        body,
        ParsedBody::Json(json!({"greetings": "Hello George, enjoy JupyterLab!"}))
    );
    mock.handle.join().unwrap();
}
