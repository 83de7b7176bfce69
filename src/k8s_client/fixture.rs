//! Loopback API server answering canned JSON, one response per connection.

use super::K8sClient;
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

type Routes = HashMap<String, (StatusCode, String)>;

pub struct FakeApiServer {
    pub addr: SocketAddr,
    requested: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl FakeApiServer {
    /// Paths missing from `routes` get a 404 `Status`. Must run inside a runtime.
    pub async fn start(routes: Vec<(&str, StatusCode, Value)>) -> Self {
        let routes: Arc<Routes> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
                .collect(),
        );
        let requested = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = requested.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(answer(stream, routes.clone(), seen.clone()));
            }
        });

        FakeApiServer { addr, requested, handle }
    }

    /// A client for this server. Proxies from the environment are ignored.
    pub fn client(&self) -> K8sClient {
        K8sClient {
            base_url: Url::parse(&format!("http://{}", self.addr)).unwrap(),
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        }
    }

    /// Request paths in the order they arrived.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Drop for FakeApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn status_body(code: u16, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "code": code,
    })
}

async fn answer(mut stream: TcpStream, routes: Arc<Routes>, requested: Arc<Mutex<Vec<String>>>) {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&chunk[..n]),
        }
    }
    let path = String::from_utf8_lossy(&head)
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    requested.lock().unwrap().push(path.clone());

    let (status, body) = routes.get(&path).cloned().unwrap_or_else(|| {
        let body = status_body(404, "the server could not find the requested resource");
        (StatusCode::NOT_FOUND, body.to_string())
    });
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
