//! Status code classification.
//!
//! # Responsibilities
//! - Turn 4xx (client) and 5xx (server) responses into `ClientError::Http`
//! - Keep the response attached so later stages can still render it
//!
//! # Design Decisions
//! - The error message is the status' canonical reason phrase
//! - `only_server_errors` lets 4xx responses through as successes
//! - With `fail_on_status` off every response passes through

use std::task::{Context, Poll};

use axum::http::{Request, Response, StatusCode};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::config::TransportConfig;
use crate::transport::error::ClientError;

/// Which status classes are turned into errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Classification {
    #[default]
    ClientAndServer,
    ServerOnly,
    Disabled,
}

/// Layer that classifies failing status codes as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusErrorLayer {
    classification: Classification,
}

impl StatusErrorLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only 5xx responses become errors.
    pub fn only_server_errors() -> Self {
        Self {
            classification: Classification::ServerOnly,
        }
    }

    /// Build from the `fail_on_status` / `only_server_errors` settings.
    pub fn from_config(config: &TransportConfig) -> Self {
        let classification = match (config.fail_on_status, config.only_server_errors) {
            (false, _) => Classification::Disabled,
            (true, true) => Classification::ServerOnly,
            (true, false) => Classification::ClientAndServer,
        };
        Self { classification }
    }

    /// Whether `status` is classified as a failure by this layer.
    pub fn is_failure(&self, status: StatusCode) -> bool {
        match self.classification {
            Classification::ClientAndServer => status.is_client_error() || status.is_server_error(),
            Classification::ServerOnly => status.is_server_error(),
            Classification::Disabled => false,
        }
    }
}

impl<S> Layer<S> for StatusErrorLayer {
    type Service = StatusError<S>;

    fn layer(&self, inner: S) -> Self::Service {
        StatusError {
            inner,
            layer: *self,
        }
    }
}

/// Service produced by [`StatusErrorLayer`].
#[derive(Debug, Clone)]
pub struct StatusError<S> {
    inner: S,
    layer: StatusErrorLayer,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for StatusError<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>, Error = ClientError<ResBody>>,
    S::Future: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = ClientError<ResBody>;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let layer = self.layer;
        let fut = self.inner.call(request);

        Box::pin(async move {
            let response = fut.await?;
            let status = response.status();
            if layer.is_failure(status) {
                let reason = status.canonical_reason().unwrap_or("Unknown status");
                return Err(ClientError::http(reason, response));
            }
            Ok(response)
        })
    }
}
