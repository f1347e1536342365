//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use request_logger::observability::{DiagnosticEvent, EventSink, Severity};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Owned copy of an event seen by [`RecordingSink`].
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub severity: Severity,
    pub message: String,
    pub uid: String,
    pub milliseconds: Option<u64>,
    pub exception: Option<String>,
    pub keys: Vec<&'static str>,
}

/// Sink that keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    /// Events for one invocation, in emission order.
    pub fn events_for(&self, uid: &str) -> Vec<Recorded> {
        self.events().into_iter().filter(|e| e.uid == uid).collect()
    }
}

impl EventSink for RecordingSink {
    fn log(&self, event: &DiagnosticEvent<'_>) {
        let ctx = &event.context;
        self.events.lock().unwrap().push(Recorded {
            severity: event.severity,
            message: event.message.clone(),
            uid: ctx.uid.to_string(),
            milliseconds: ctx.milliseconds,
            exception: ctx.exception.map(|e| e.to_string()),
            keys: ctx.keys(),
        });
    }
}

/// Start a programmable backend on an ephemeral port.
///
/// Each connection gets one response built from `f`, then is closed.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
