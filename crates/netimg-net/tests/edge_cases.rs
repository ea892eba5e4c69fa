//! Edge case tests for netimg-net
//!
//! Runs the loader against a one-shot local HTTP server.

use std::error::Error;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use netimg_net::*;

/// Serve a single HTTP response on an ephemeral port, return the base URL
fn serve_once(status_line: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                content_type,
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        }
    });

    format!("http://{}", addr)
}

fn quick_loader() -> ResourceLoader {
    let config = HttpClient::builder()
        .connect_timeout(Duration::from_secs(2))
        .request_timeout(Duration::from_secs(5))
        .config();
    ResourceLoader::with_config(config)
}

// ============================================================================
// SUCCESSFUL FETCH
// ============================================================================

#[test]
fn test_fetch_reads_body_and_headers() {
    let base = serve_once("200 OK", "image/png", b"not really a png".to_vec());

    let resp = quick_loader().fetch(&format!("{}/a.png", base)).unwrap();

    assert_eq!(resp.status, 200);
    assert!(resp.ok());
    assert_eq!(resp.content_type(), Some("image/png"));
    assert_eq!(resp.body, b"not really a png");
}

#[test]
fn test_fetch_empty_body() {
    let base = serve_once("200 OK", "image/jpeg", Vec::new());

    let resp = quick_loader().fetch(&format!("{}/empty.jpg", base)).unwrap();

    assert!(resp.ok());
    assert!(resp.body.is_empty());
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_fetch_not_found_is_response_not_error() {
    let base = serve_once("404 Not Found", "text/plain", b"missing".to_vec());

    let resp = quick_loader().fetch(&format!("{}/gone.png", base)).unwrap();

    assert_eq!(resp.status, 404);
    assert!(matches!(
        resp.error_for_status(),
        Err(NetError::HttpError { status: 404 })
    ));
}

#[test]
fn test_fetch_unreachable_host() {
    // Port 1 on loopback: nothing listens there
    let result = quick_loader().fetch("http://127.0.0.1:1/image.jpg");
    match result {
        // The transport error keeps its cause chain down to the OS error
        Err(err @ NetError::Request(_)) => assert!(err.source().is_some()),
        other => panic!("expected a request error, got {:?}", other),
    }
}

#[test]
fn test_fetch_rejects_unsupported_scheme() {
    let result = quick_loader().fetch("data:image/png;base64,AAAA");
    assert!(matches!(result, Err(NetError::UnsupportedScheme(_))));
}

#[test]
fn test_fetch_invalid_url() {
    assert!(matches!(
        ResourceLoader::new().fetch("://nope"),
        Err(NetError::InvalidUrl(_))
    ));
}
