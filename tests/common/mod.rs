#![allow(dead_code)]

//! Minimal HTTP/1.1 server for integration tests. Serves fixed responses by request path; every
//! connection is closed after one response.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Once};
use std::thread;
use std::time::Duration;

use asset_fetch::Fetcher;

/// A canned response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
    /// If set, the body is cut off after this many bytes while the full length is announced.
    pub truncate_at: Option<usize>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            truncate_at: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"error page".to_vec(),
            truncate_at: None,
        }
    }

    pub fn truncated(body: impl Into<Vec<u8>>, truncate_at: usize) -> Self {
        Self {
            truncate_at: Some(truncate_at),
            ..Self::ok(body)
        }
    }
}

/// A running server; `url` builds URLs for paths on it.
#[derive(Debug, Clone)]
pub struct TestServer {
    base: String,
}

impl TestServer {
    /// Starts a server in a background thread. It runs until the process exits; unknown paths
    /// get a 404.
    pub fn start<I, P>(routes: I) -> Self
    where
        I: IntoIterator<Item = (P, Response)>,
        P: Into<String>,
    {
        let routes: HashMap<String, Response> = routes
            .into_iter()
            .map(|(path, response)| (path.into(), response))
            .collect();
        let routes = Arc::new(routes);

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local address").port();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{port}"),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Response>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    // read until the end of the request head; requests carry no body
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let response = routes
        .get(path)
        .cloned()
        .unwrap_or_else(|| Response::status(404));
    let head = format!(
        "HTTP/1.1 {} Test\r\nContent-Length: {}\r\nContent-Type: application/javascript\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len(),
    );
    let body = match response.truncate_at {
        Some(n) => &response.body[..n],
        None => &response.body[..],
    };
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

/// Returns a URL on which connections are refused: the port was just free.
pub fn refused_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}{path}")
}

/// Returns a URL whose server accepts connections but never responds.
pub fn silent_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local address").port();
    thread::spawn(move || {
        let mut streams = Vec::new();
        for stream in listener.incoming().flatten() {
            // keep the connection open without answering
            streams.push(stream);
        }
    });
    format!("http://127.0.0.1:{port}{path}")
}

/// A fetcher talking to the local test servers directly, regardless of proxy settings in the
/// environment.
pub fn fetcher(timeout: Duration) -> Fetcher {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("client");
    Fetcher::from_client(client)
}

/// Makes clients built from the environment connect to the local test servers directly, even when
/// a proxy is configured. Call before building such a client.
pub fn bypass_proxy() {
    static BYPASS: Once = Once::new();
    BYPASS.call_once(|| {
        for var in ["NO_PROXY", "no_proxy"] {
            // SAFETY: std serializes its own environment accesses, and the variables are only
            // read through std by the HTTP client
            unsafe { std::env::set_var(var, "127.0.0.1,localhost") };
        }
    });
}
