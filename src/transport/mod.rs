//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! Request<Bytes>
//!     → status.rs (StatusErrorLayer: 4xx/5xx → ClientError::Http with the response)
//!     → client.rs (HyperTransport: hyper-util client, body buffering)
//!     → upstream server
//! ```
//!
//! # Design Decisions
//! - Whether a status is an error is decided here, never by the interceptor
//! - Errors that carry a response expose it through `TransportError::response`
//! - Connection failures have no response and map to `ClientError::Network`

pub mod client;
pub mod error;
pub mod status;

pub use client::HyperTransport;
pub use error::{ClientError, TransportError};
pub use status::{StatusError, StatusErrorLayer};
