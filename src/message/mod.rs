//! HTTP message rendering subsystem.
//!
//! # Data Flow
//! ```text
//! outgoing Request<B>
//!     → head.rs (RequestHead snapshot kept by request-aware rendering)
//!     → formatter.rs (Formatter renders request / response as a string)
//!         ↳ body.rs (MessageBody preview for formatters that print bodies)
//!     → Rendering strategy (Plain or RequestAware), picked once at construction
//! ```
//!
//! # Design Decisions
//! - Formatters are pure: `&message → String`, no I/O
//! - Request-aware rendering is a separate trait, not a runtime probe
//! - Bodies are only previewed when already buffered in memory

pub mod body;
pub mod formatter;
pub mod head;

pub use body::MessageBody;
pub use formatter::{
    ConfiguredFormatter, Formatter, FullFormatter, Plain, Rendering, RequestAware,
    RequestAwareFormatter, SimpleFormatter,
};
pub use head::RequestHead;
