//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes by path (first match wins):
//! - any path ending in `/drop` -> connection closed without a response
//! - `/img/feed_fullsize/...` -> 200 with the configured image body
//! - `/json` -> 200 `{"ok":true}`
//! - `/not-json` -> 200 text body
//! - `/redirect` -> 302 to `/json`
//! - anything else -> 404

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until process exit.
pub fn start(image: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let image = Arc::new(image);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let image = Arc::clone(&image);
            thread::spawn(move || handle(stream, &image));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, image: &[u8]) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    if path.ends_with("/drop") {
        // Close without answering.
    } else if path.starts_with("/img/feed_fullsize/") {
        respond(&mut stream, "200 OK", "image/jpeg", &[], image);
    } else if path == "/json" {
        respond(&mut stream, "200 OK", "application/json", &[], br#"{"ok":true}"#);
    } else if path == "/not-json" {
        respond(&mut stream, "200 OK", "text/plain", &[], b"plain text");
    } else if path == "/redirect" {
        respond(&mut stream, "302 Found", "text/plain", &["Location: /json"], b"");
    } else {
        respond(&mut stream, "404 Not Found", "text/plain", &[], b"missing");
    }
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, extra: &[&str], body: &[u8]) {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nLast-Modified: Fri, 21 May 2021 14:46:56 GMT\r\nConnection: close\r\n",
        status,
        content_type,
        body.len()
    );
    for line in extra {
        head.push_str(line);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
