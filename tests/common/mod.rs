//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Hit counter shared with a mock upstream.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicU32>);

impl CallCounter {
    pub fn count(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    fn increment(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// The responder receives the raw request text (head and body) and returns
/// (status, body). Replies are always application/json, mirroring the
/// identity provider.
pub async fn start_mock_upstream<F, Fut>(responder: F) -> (SocketAddr, CallCounter)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let counter = CallCounter::default();
    let accept_counter = counter.clone();
    let responder = Arc::new(responder);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    accept_counter.increment();
                    let responder = responder.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (status, body) = responder(request).await;
                        let status_line = match status {
                            200 => "200 OK",
                            201 => "201 Created",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, counter)
}

/// Read one HTTP/1.1 request: the head, then the declared body length.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = find_header_end(&data) {
            break pos;
        }
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break data.len(),
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    };

    let declared = content_length(&data[..header_end]);
    while data.len() < header_end + declared {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }

    String::from_utf8_lossy(&data).into_owned()
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
