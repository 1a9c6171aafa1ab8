//! Minimal HTTP/1.1 server that answers every request with one canned reply.
//!
//! Used to drive the curl transport into each classification path: success,
//! 4xx/5xx statuses, content-check bodies and stalled responses.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Reply {
    /// Status line after `HTTP/1.1`, e.g. "503 Service Unavailable".
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    /// If set, read the request then sleep this long before answering.
    pub stall: Option<Duration>,
}

impl Reply {
    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            stall: None,
        }
    }

    pub fn json(status: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.as_bytes().to_vec(),
            stall: None,
        }
    }

    pub fn html(status: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/html; charset=utf-8"),
            body: body.as_bytes().to_vec(),
            stall: None,
        }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self {
            stall: Some(delay),
            ..Self::status("200 OK")
        }
    }
}

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(reply: Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let reply = Arc::new(reply);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let reply = Arc::clone(&reply);
            thread::spawn(move || handle(stream, &reply));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Returns a URL on a local port that nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, reply: &Reply) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    if let Some(delay) = reply.stall {
        thread::sleep(delay);
    }
    let content_type = reply
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        reply.status,
        reply.body.len(),
        content_type
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
}
