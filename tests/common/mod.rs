//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A running mock backend.
#[allow(dead_code)]
pub struct Backend {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl Backend {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Raw requests received so far, head and body.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock backend. `f` receives the 0-based call index.
pub async fn start_programmable_backend<F, Fut>(f: F) -> Backend
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let backend = Backend {
        addr,
        calls: calls.clone(),
        requests: requests.clone(),
    };

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let f = f.clone();
            let calls = calls.clone();
            let requests = requests.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                requests.lock().unwrap().push(request);
                let index = calls.fetch_add(1, Ordering::SeqCst);

                let (status, body) = f(index).await;
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    backend
}

/// Serve `script` in order, repeating the last entry once it runs out.
#[allow(dead_code)]
pub async fn start_scripted_backend(script: Vec<(u16, String)>) -> Backend {
    let script = Arc::new(script);
    start_programmable_backend(move |index| {
        let script = script.clone();
        async move {
            let last = script.len().saturating_sub(1);
            script[(index as usize).min(last)].clone()
        }
    })
    .await
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(String::from_utf8_lossy(&buf).to_string())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
