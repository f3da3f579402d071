//! Minimal HTTP/1.1 server serving canned responses for integration tests.
//!
//! Routes are an exact map from request target (path + query) to a canned
//! response; unknown targets get 404. Bind first, then build bodies that
//! reference `base_url()`, then call `serve`.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(body: String) -> Self {
        Canned {
            status: 200,
            content_type: "application/json",
            body: body.into_bytes(),
        }
    }

    pub fn bytes(body: Vec<u8>, content_type: &'static str) -> Self {
        Canned {
            status: 200,
            content_type,
            body,
        }
    }

    pub fn not_found() -> Self {
        Canned {
            status: 404,
            content_type: "text/plain",
            body: b"not found".to_vec(),
        }
    }
}

/// A bound-but-not-yet-serving test server.
pub struct ApiServer {
    listener: TcpListener,
    base: String,
}

impl ApiServer {
    /// Bind an ephemeral port on localhost.
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        ApiServer {
            listener,
            base: format!("http://127.0.0.1:{}", port),
        }
    }

    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Start serving `routes` in a background thread. The server runs until
    /// the process exits.
    pub fn serve(self, routes: HashMap<String, Canned>) {
        let routes = Arc::new(routes);
        thread::spawn(move || {
            for stream in self.listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Canned>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let target = match parse_target(request) {
        Some(t) => t,
        None => return,
    };

    let canned = routes.get(target).cloned().unwrap_or_else(Canned::not_found);
    let reason = match canned.status {
        200 => "OK",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: {}\r\nConnection: close\r\n\r\n",
        canned.status,
        reason,
        canned.body.len(),
        canned.content_type
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&canned.body);
}

/// Returns the request target (path + query) of a `GET <target> HTTP/1.x` line.
fn parse_target(request: &str) -> Option<&str> {
    let first_line = request.lines().next()?;
    let mut parts = first_line.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    parts.next()
}
