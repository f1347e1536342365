//! Tower integration for [`LoggerPlugin`].

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::message::{MessageBody, Rendering};
use crate::observability::EventSink;
use crate::plugin::logger::LoggerPlugin;
use crate::transport::TransportError;

/// Layer that logs every request passing through the wrapped service.
///
/// All services built from one layer share the same plugin.
pub struct LoggerLayer<K, R> {
    plugin: Arc<LoggerPlugin<K, R>>,
}

impl<K, R> LoggerLayer<K, R> {
    pub fn new(plugin: LoggerPlugin<K, R>) -> Self {
        Self {
            plugin: Arc::new(plugin),
        }
    }
}

impl<K, R> Clone for LoggerLayer<K, R> {
    fn clone(&self) -> Self {
        Self {
            plugin: Arc::clone(&self.plugin),
        }
    }
}

impl<S, K, R> Layer<S> for LoggerLayer<K, R> {
    type Service = LoggerService<S, K, R>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggerService {
            inner,
            plugin: Arc::clone(&self.plugin),
        }
    }
}

/// Service produced by [`LoggerLayer`].
pub struct LoggerService<S, K, R> {
    inner: S,
    plugin: Arc<LoggerPlugin<K, R>>,
}

impl<S: Clone, K, R> Clone for LoggerService<S, K, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            plugin: Arc::clone(&self.plugin),
        }
    }
}

impl<S, K, R, ReqBody, ResBody> Service<Request<ReqBody>> for LoggerService<S, K, R>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: TransportError<Body = ResBody>,
    K: EventSink + 'static,
    R: Rendering + 'static,
    ReqBody: MessageBody + Send + 'static,
    ResBody: MessageBody + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // The clone is not ready; keep it and drive the one poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let plugin = Arc::clone(&self.plugin);

        Box::pin(async move {
            plugin
                .handle_request(request, |request| inner.call(request))
                .await
        })
    }
}
