//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use coolapk_gateway::resilience::Deadline;
use coolapk_gateway::upstream::{FeedSource, UpstreamError, UpstreamResponse};

/// A call observed by [`FakeFeeds`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Headlines { page: i64 },
    TagFeed { tag: String, page: i64 },
}

/// How [`FakeFeeds`] answers.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Behavior {
    Respond(u16, &'static str),
    /// Sleep on the tokio clock, then respond.
    Slow(Duration, u16, &'static str),
    /// Fail with a non-timeout error.
    Fail,
    /// Report the deadline as exceeded straight away.
    DeadlineExceeded,
}

/// In-memory `FeedSource` recording every call.
#[allow(dead_code)]
pub struct FakeFeeds {
    behavior: Behavior,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl FakeFeeds {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, call: Call) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.lock().unwrap().push(call);
        match self.behavior.clone() {
            Behavior::Respond(status, body) => Ok(UpstreamResponse::new(status, body)),
            Behavior::Slow(delay, status, body) => {
                tokio::time::sleep(delay).await;
                Ok(UpstreamResponse::new(status, body))
            }
            Behavior::Fail => Err(UpstreamError::InvalidUrl(url::ParseError::EmptyHost)),
            Behavior::DeadlineExceeded => Err(UpstreamError::DeadlineExceeded),
        }
    }
}

#[async_trait]
impl FeedSource for FakeFeeds {
    async fn fetch_headlines(
        &self,
        page: i64,
        _deadline: Deadline,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.answer(Call::Headlines { page }).await
    }

    async fn fetch_tag_feed(
        &self,
        tag: &str,
        page: i64,
        _deadline: Deadline,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.answer(Call::TagFeed {
            tag: tag.to_string(),
            page,
        })
        .await
    }
}

/// A raw-TCP stand-in for the Coolapk API.
#[allow(dead_code)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request heads (request line + headers) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock upstream answering every request with `status` and `body`
/// after `delay`.
#[allow(dead_code)]
pub async fn start_mock_upstream(status: u16, body: &'static str, delay: Duration) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        seen.lock().unwrap().push(head);
                        tokio::time::sleep(delay).await;

                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
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

    MockUpstream { addr, requests }
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
