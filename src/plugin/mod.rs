//! Request interception subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → layer.rs (LoggerService: tower stage, shares one LoggerPlugin)
//!     → logger.rs (LoggerPlugin::handle_request)
//!         → outcome.rs (Invocation: uid + monotonic start)
//!         → start event → next stage → completion event (Outcome)
//!     ← same response / same error
//! ```
//!
//! # Design Decisions
//! - The interceptor observes only; it never retries, rewrites or times out
//! - Per-call state lives in `Invocation`; the plugin itself is immutable
//! - Success vs. failure is decided downstream (`TransportError`)

pub mod layer;
pub mod logger;
pub mod outcome;

pub use layer::{LoggerLayer, LoggerService};
pub use logger::LoggerPlugin;
pub use outcome::{Invocation, Outcome};
