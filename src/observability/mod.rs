//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! LoggerPlugin
//!     → event.rs (DiagnosticEvent: severity, message, uid/milliseconds/exception)
//!     → sink.rs (EventSink: tracing events or channel handoff)
//!     → logging.rs (process-wide tracing subscriber, stdout)
//! ```
//!
//! # Design Decisions
//! - Events carry a correlation uid, not the request/response objects
//! - Sinks never block the request path
//! - Log level configurable via config and `RUST_LOG`

pub mod event;
pub mod logging;
pub mod sink;

pub use event::{DiagnosticEvent, EventContext, OwnedEvent, Severity, Uid};
pub use logging::{init_logging, LoggingError};
pub use sink::{ChannelSink, EventSink, TracingSink};
