//! Owned snapshot of a request's head.

use axum::http::{HeaderMap, Method, Request, Uri, Version};

/// Method, URI, version and headers of a request.
///
/// The request itself is moved into the next pipeline stage, so anything
/// rendered after the downstream settles works from this snapshot.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderMap,
}

impl RequestHead {
    /// Capture the head of `request` without touching its body.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            version: request.version(),
            headers: request.headers().clone(),
        }
    }
}
