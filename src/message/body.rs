//! Body preview capability.

use axum::body::Bytes;

/// A body whose bytes can be inspected without consuming it.
///
/// Streaming bodies have nothing to preview; formatters that print bodies
/// only see what is already buffered.
pub trait MessageBody {
    /// Buffered bytes of the body, if any.
    fn preview(&self) -> Option<&[u8]>;
}

impl MessageBody for () {
    fn preview(&self) -> Option<&[u8]> {
        None
    }
}

impl MessageBody for String {
    fn preview(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl MessageBody for &'static str {
    fn preview(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl MessageBody for Vec<u8> {
    fn preview(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl MessageBody for Bytes {
    fn preview(&self) -> Option<&[u8]> {
        Some(self.as_ref())
    }
}
