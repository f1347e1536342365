//! Request/response logging interceptor.
//!
//! # Responsibilities
//! - Emit one start event before handing the request to the next stage
//! - Emit exactly one completion event once that stage settles
//! - Return the downstream response or error untouched
//!
//! # Event Messages
//! ```text
//! info   Sending request:\n{request}                       { uid }
//! info   Received response:\n{response}                    { uid, milliseconds }
//! error  Error:\n{error}\nwhen sending request:\n{request} { uid, milliseconds, exception }
//! error  Error:\n{error}\nwith response:\n{response}       { uid, milliseconds, exception }
//! ```
//!
//! # Design Decisions
//! - Suspends only at the hand-off to `next`; nothing blocks
//! - If the returned future is dropped before `next` settles, no completion event is emitted

use std::future::Future;

use axum::http::{Request, Response};

use crate::message::{
    Formatter, MessageBody, Plain, Rendering, RequestAware, RequestAwareFormatter,
    SimpleFormatter,
};
use crate::observability::{DiagnosticEvent, EventContext, EventSink};
use crate::plugin::outcome::{Invocation, Outcome};
use crate::transport::TransportError;

/// Logs every request passing through it and the way it completed.
#[derive(Debug, Clone)]
pub struct LoggerPlugin<K, R = RequestAware<SimpleFormatter>> {
    sink: K,
    rendering: R,
}

impl<K: EventSink> LoggerPlugin<K, RequestAware<SimpleFormatter>> {
    /// Log to `sink` with the one-line [`SimpleFormatter`].
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            rendering: RequestAware(SimpleFormatter),
        }
    }
}

impl<K: EventSink, F: Formatter> LoggerPlugin<K, Plain<F>> {
    /// Log with `formatter`, rendering responses on their own.
    pub fn with_formatter(sink: K, formatter: F) -> Self {
        Self {
            sink,
            rendering: Plain(formatter),
        }
    }
}

impl<K: EventSink, F: RequestAwareFormatter> LoggerPlugin<K, RequestAware<F>> {
    /// Log with `formatter`, rendering responses in the context of their request.
    pub fn with_request_aware_formatter(sink: K, formatter: F) -> Self {
        Self {
            sink,
            rendering: RequestAware(formatter),
        }
    }
}

impl<K, R> LoggerPlugin<K, R>
where
    K: EventSink,
    R: Rendering,
{
    /// Forward `request` to `next` exactly once, logging around it.
    ///
    /// The returned value is the one `next` produced: the same response on
    /// success, the same error (attached response included) on failure.
    pub async fn handle_request<ReqBody, ResBody, E, N, Fut>(
        &self,
        request: Request<ReqBody>,
        next: N,
    ) -> Result<Response<ResBody>, E>
    where
        ReqBody: MessageBody,
        ResBody: MessageBody,
        E: TransportError<Body = ResBody>,
        N: FnOnce(Request<ReqBody>) -> Fut,
        Fut: Future<Output = Result<Response<ResBody>, E>>,
    {
        let invocation = Invocation::start();
        let snapshot = self.rendering.snapshot(&request);
        let rendered_request = self.rendering.request(&request);

        self.sink.log(&DiagnosticEvent::info(
            format!("Sending request:\n{}", rendered_request),
            EventContext::start(invocation.uid),
        ));

        let result = next(request).await;
        let milliseconds = invocation.elapsed_ms();

        self.sink.log(&self.completion_event(
            &invocation,
            milliseconds,
            &snapshot,
            &rendered_request,
            &result,
        ));

        result
    }

    fn completion_event<'a, ResBody, E>(
        &self,
        invocation: &Invocation,
        milliseconds: u64,
        snapshot: &R::Snapshot,
        rendered_request: &str,
        result: &'a Result<Response<ResBody>, E>,
    ) -> DiagnosticEvent<'a>
    where
        ResBody: MessageBody,
        E: TransportError<Body = ResBody>,
    {
        match Outcome::classify(result) {
            Outcome::Success(response) => DiagnosticEvent::info(
                format!(
                    "Received response:\n{}",
                    self.rendering.response(response, snapshot)
                ),
                EventContext::completed(invocation.uid, milliseconds),
            ),
            Outcome::Failure(error) => DiagnosticEvent::error(
                format!(
                    "Error:\n{}\nwhen sending request:\n{}",
                    error, rendered_request
                ),
                EventContext::failed(invocation.uid, milliseconds, error),
            ),
            Outcome::FailureWithResponse(error, response) => DiagnosticEvent::error(
                format!(
                    "Error:\n{}\nwith response:\n{}",
                    error,
                    self.rendering.response(response, snapshot)
                ),
                EventContext::failed(invocation.uid, milliseconds, error),
            ),
        }
    }
}
