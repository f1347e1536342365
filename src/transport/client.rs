//! HTTP client transport.
//!
//! # Responsibilities
//! - Send requests upstream through the hyper-util connection pool
//! - Buffer the response body so formatters can preview it
//! - Map connection failures to `ClientError::Network`
//!
//! # Design Decisions
//! - A body over `max_response_bytes` is an `Http` error that keeps the
//!   status line, headers and the first `max_response_bytes` of the body

use std::task::{Context, Poll};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower::Service;

use crate::config::TransportConfig;
use crate::transport::error::ClientError;

/// `tower::Service` that performs the actual HTTP exchange.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
    max_response_bytes: usize,
}

impl HyperTransport {
    pub fn new(config: &TransportConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self {
            client,
            max_response_bytes: config.max_response_bytes,
        }
    }
}

impl Service<Request<Bytes>> for HyperTransport {
    type Response = Response<Bytes>;
    type Error = ClientError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let client = self.client.clone();
        let limit = self.max_response_bytes;

        Box::pin(async move {
            if request.uri().host().is_none() {
                return Err(ClientError::request(format!(
                    "Request URI must be absolute, got \"{}\"",
                    request.uri()
                )));
            }

            let (parts, body) = request.into_parts();
            let request = Request::from_parts(parts, Body::from(body));

            let response = client
                .request(request)
                .await
                .map_err(ClientError::<Bytes>::network_from)?;

            let (parts, body) = response.into_parts();
            let mut stream = Body::new(body).into_data_stream();
            let mut buffer = Vec::new();

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(ClientError::<Bytes>::network_from)?;
                if buffer.len() + chunk.len() > limit {
                    buffer.extend_from_slice(&chunk[..limit - buffer.len()]);
                    let truncated = Response::from_parts(parts, Bytes::from(buffer));
                    return Err(ClientError::http(
                        format!("Response body exceeds {} bytes", limit),
                        truncated,
                    ));
                }
                buffer.extend_from_slice(&chunk);
            }

            Ok(Response::from_parts(parts, Bytes::from(buffer)))
        })
    }
}
