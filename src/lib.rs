//! Request/response logging for tower-based HTTP clients.
//!
//! # Architecture Overview
//!
//! ```text
//!     caller ──▶ LoggerLayer ──▶ StatusErrorLayer ──▶ HyperTransport ──▶ upstream
//!                    │
//!                    ├─ info  "Sending request:…"    { uid }
//!                    └─ info  "Received response:…"  { uid, milliseconds }
//!                       error "Error:…"              { uid, milliseconds, exception }
//!                    │
//!                    ▼
//!                EventSink (tracing / JSON channel)
//! ```

pub mod config;
pub mod message;
pub mod observability;
pub mod plugin;
pub mod transport;

pub use config::LoggerConfig;
pub use message::{Formatter, RequestAwareFormatter, SimpleFormatter};
pub use observability::{EventSink, TracingSink};
pub use plugin::{LoggerLayer, LoggerPlugin};
pub use transport::{ClientError, HyperTransport, StatusErrorLayer, TransportError};
