// Shared test helpers: a loopback HTTP peer that answers with canned bytes.
//
// Each accepted connection reads one request head, records it, writes the
// canned response for the request path and closes the socket.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A running mock peer.
pub struct MockPeer {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    pub port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockPeer {
    /// Raw request heads received so far, in arrival order.
    #[allow(dead_code)] // Not every test file inspects requests
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn connections(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Starts a peer serving `routes` (request path → raw response).
/// Unknown paths get a 404.
pub async fn start_mock_peer(routes: Vec<(&str, String)>) -> MockPeer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock peer");
    let port = listener.local_addr().expect("No local address").port();
    let routes: Arc<HashMap<String, String>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, raw)| (path.to_string(), raw))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));

    let log = requests.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let head = read_request_head(&mut socket).await;
                let path = head.split(' ').nth(1).unwrap_or("/").to_string();
                log.lock().unwrap().push(head);

                let raw = routes.get(&path).cloned().unwrap_or_else(|| {
                    "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n\r\nmissing".to_string()
                });
                let _ = socket.write_all(raw.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockPeer {
        base_url: format!("http://127.0.0.1:{port}"),
        port,
        requests,
    }
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
