//! Request and response formatters.
//!
//! # Responsibilities
//! - Render a request or response as a human-readable string
//! - Optionally render a response in the context of its request
//! - Fix, at construction time, which of the two response renderings is used
//!
//! # Design Decisions
//! - `RequestAwareFormatter` extends `Formatter`; a type opts in by implementing it
//! - `Plain` / `RequestAware` wrap a formatter; the interceptor never probes capabilities per call
//! - Each strategy snapshots only what its response rendering reads

use std::fmt::Write;

use axum::http::{HeaderMap, Method, Request, Response, Version};

use crate::config::{FormatterConfig, FormatterKind};
use crate::message::body::MessageBody;
use crate::message::head::RequestHead;

/// Renders requests and responses as strings.
pub trait Formatter: Send + Sync {
    fn format_request<B: MessageBody>(&self, request: &Request<B>) -> String;

    fn format_response<B: MessageBody>(&self, response: &Response<B>) -> String;
}

/// A formatter that can take the originating request into account when
/// rendering a response.
pub trait RequestAwareFormatter: Formatter {
    fn format_response_for_request<B: MessageBody>(
        &self,
        response: &Response<B>,
        request: &RequestHead,
    ) -> String;
}

/// The rendering strategy the interceptor runs with.
pub trait Rendering: Send + Sync {
    /// What response rendering needs from the request once it has moved downstream.
    type Snapshot: Send;

    fn snapshot<B>(&self, request: &Request<B>) -> Self::Snapshot;

    fn request<B: MessageBody>(&self, request: &Request<B>) -> String;

    fn response<B: MessageBody>(&self, response: &Response<B>, request: &Self::Snapshot) -> String;
}

/// Renders responses without looking at the request.
#[derive(Debug, Clone, Default)]
pub struct Plain<F>(pub F);

/// Renders responses through [`RequestAwareFormatter::format_response_for_request`].
#[derive(Debug, Clone, Default)]
pub struct RequestAware<F>(pub F);

impl<F: Formatter> Rendering for Plain<F> {
    type Snapshot = ();

    fn snapshot<B>(&self, _request: &Request<B>) {}

    fn request<B: MessageBody>(&self, request: &Request<B>) -> String {
        self.0.format_request(request)
    }

    fn response<B: MessageBody>(&self, response: &Response<B>, _request: &()) -> String {
        self.0.format_response(response)
    }
}

impl<F: RequestAwareFormatter> Rendering for RequestAware<F> {
    type Snapshot = RequestHead;

    fn snapshot<B>(&self, request: &Request<B>) -> RequestHead {
        RequestHead::from_request(request)
    }

    fn request<B: MessageBody>(&self, request: &Request<B>) -> String {
        self.0.format_request(request)
    }

    fn response<B: MessageBody>(&self, response: &Response<B>, request: &RequestHead) -> String {
        self.0.format_response_for_request(response, request)
    }
}

/// Protocol version as printed in message start lines (`1.1`, `2.0`, ...).
pub fn protocol_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

/// One-line formatter: `GET / 1.1` and `200 OK 1.1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFormatter;

impl Formatter for SimpleFormatter {
    fn format_request<B: MessageBody>(&self, request: &Request<B>) -> String {
        format!(
            "{} {} {}",
            request.method(),
            request.uri(),
            protocol_version(request.version())
        )
    }

    fn format_response<B: MessageBody>(&self, response: &Response<B>) -> String {
        let status = response.status();
        format!(
            "{} {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            protocol_version(response.version())
        )
    }
}

impl RequestAwareFormatter for SimpleFormatter {
    fn format_response_for_request<B: MessageBody>(
        &self,
        response: &Response<B>,
        _request: &RequestHead,
    ) -> String {
        self.format_response(response)
    }
}

/// Full message formatter: start line, headers, and a truncated body.
#[derive(Debug, Clone, Copy)]
pub struct FullFormatter {
    /// Maximum number of body bytes printed.
    pub max_body_length: usize,
}

impl Default for FullFormatter {
    fn default() -> Self {
        Self {
            max_body_length: 1000,
        }
    }
}

impl FullFormatter {
    pub fn new(max_body_length: usize) -> Self {
        Self { max_body_length }
    }

    fn write_headers(out: &mut String, headers: &HeaderMap) {
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            let _ = writeln!(out, "{}: {}", name, value);
        }
        out.push('\n');
    }

    fn write_body(&self, out: &mut String, body: Option<&[u8]>) {
        if let Some(bytes) = body {
            let end = bytes.len().min(self.max_body_length);
            out.push_str(&String::from_utf8_lossy(&bytes[..end]));
        }
    }

    fn response_head<B>(response: &Response<B>) -> String {
        let status = response.status();
        let mut out = format!(
            "HTTP/{} {} {}\n",
            protocol_version(response.version()),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        Self::write_headers(&mut out, response.headers());
        out
    }
}

impl Formatter for FullFormatter {
    fn format_request<B: MessageBody>(&self, request: &Request<B>) -> String {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let mut out = format!(
            "{} {} HTTP/{}\n",
            request.method(),
            target,
            protocol_version(request.version())
        );
        Self::write_headers(&mut out, request.headers());
        self.write_body(&mut out, request.body().preview());
        out
    }

    fn format_response<B: MessageBody>(&self, response: &Response<B>) -> String {
        let mut out = Self::response_head(response);
        self.write_body(&mut out, response.body().preview());
        out
    }
}

impl RequestAwareFormatter for FullFormatter {
    fn format_response_for_request<B: MessageBody>(
        &self,
        response: &Response<B>,
        request: &RequestHead,
    ) -> String {
        // HEAD responses carry no body.
        if request.method == Method::HEAD {
            return Self::response_head(response);
        }
        self.format_response(response)
    }
}

/// Formatter chosen from configuration at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredFormatter {
    Simple(SimpleFormatter),
    Full(FullFormatter),
}

impl ConfiguredFormatter {
    pub fn from_config(config: &FormatterConfig) -> Self {
        match config.kind {
            FormatterKind::Simple => ConfiguredFormatter::Simple(SimpleFormatter),
            FormatterKind::Full => {
                ConfiguredFormatter::Full(FullFormatter::new(config.max_body_length))
            }
        }
    }
}

impl Formatter for ConfiguredFormatter {
    fn format_request<B: MessageBody>(&self, request: &Request<B>) -> String {
        match self {
            ConfiguredFormatter::Simple(f) => f.format_request(request),
            ConfiguredFormatter::Full(f) => f.format_request(request),
        }
    }

    fn format_response<B: MessageBody>(&self, response: &Response<B>) -> String {
        match self {
            ConfiguredFormatter::Simple(f) => f.format_response(response),
            ConfiguredFormatter::Full(f) => f.format_response(response),
        }
    }
}

impl RequestAwareFormatter for ConfiguredFormatter {
    fn format_response_for_request<B: MessageBody>(
        &self,
        response: &Response<B>,
        request: &RequestHead,
    ) -> String {
        match self {
            ConfiguredFormatter::Simple(f) => f.format_response_for_request(response, request),
            ConfiguredFormatter::Full(f) => f.format_response_for_request(response, request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn get_root() -> Request<()> {
        Request::builder().uri("/").body(()).unwrap()
    }

    #[test]
    fn test_simple_formatter() {
        let f = SimpleFormatter;
        assert_eq!(f.format_request(&get_root()), "GET / 1.1");

        let response = Response::builder().status(StatusCode::OK).body(()).unwrap();
        assert_eq!(f.format_response(&response), "200 OK 1.1");

        let forbidden = Response::builder()
            .status(StatusCode::FORBIDDEN)
            .version(Version::HTTP_2)
            .body(())
            .unwrap();
        assert_eq!(f.format_response(&forbidden), "403 Forbidden 2.0");
    }

    #[test]
    fn test_full_formatter_truncates_body() {
        let f = FullFormatter::new(5);
        let request = Request::builder()
            .method(Method::POST)
            .uri("http://example.com/submit?x=1")
            .header("content-type", "text/plain")
            .body("hello world".to_string())
            .unwrap();

        assert_eq!(
            f.format_request(&request),
            "POST /submit?x=1 HTTP/1.1\ncontent-type: text/plain\n\nhello"
        );
    }

    #[test]
    fn test_full_formatter_head_request_skips_body() {
        let f = FullFormatter::default();
        let response = Response::builder()
            .status(StatusCode::OK)
            .body("ignored".to_string())
            .unwrap();

        let head_request = Request::builder().method(Method::HEAD).uri("/").body(()).unwrap();
        let head = RequestHead::from_request(&head_request);
        assert_eq!(f.format_response_for_request(&response, &head), "HTTP/1.1 200 OK\n\n");

        let get = RequestHead::from_request(&get_root());
        assert_eq!(f.format_response_for_request(&response, &get), "HTTP/1.1 200 OK\n\nignored");
    }

    #[test]
    fn test_plain_rendering_ignores_request() {
        let rendering = Plain(FullFormatter::default());
        let response = Response::builder().body("body".to_string()).unwrap();
        assert_eq!(rendering.response(&response, &()), "HTTP/1.1 200 OK\n\nbody");
    }

    #[test]
    fn test_request_aware_rendering_snapshots_head() {
        let rendering = RequestAware(FullFormatter::default());
        let response = Response::builder().body("body".to_string()).unwrap();
        let head_request = Request::builder().method(Method::HEAD).uri("/").body(()).unwrap();
        let snapshot = rendering.snapshot(&head_request);

        assert_eq!(snapshot.method, Method::HEAD);
        assert_eq!(rendering.response(&response, &snapshot), "HTTP/1.1 200 OK\n\n");
    }

    #[test]
    fn test_configured_formatter() {
        let config = FormatterConfig {
            kind: FormatterKind::Full,
            max_body_length: 3,
            request_aware: true,
        };
        let f = ConfiguredFormatter::from_config(&config);
        let response = Response::builder().body("abcdef".to_string()).unwrap();
        assert_eq!(f.format_response(&response), "HTTP/1.1 200 OK\n\nabc");

        let simple = ConfiguredFormatter::from_config(&FormatterConfig::default());
        assert_eq!(simple.format_request(&get_root()), "GET / 1.1");
    }
}
