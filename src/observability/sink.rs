//! Event sinks.
//!
//! # Responsibilities
//! - Receive diagnostic events from the interceptor
//! - Hand them off without blocking the request path
//!
//! # Design Decisions
//! - `TracingSink` is the default; the installed subscriber decides what happens next
//! - `ChannelSink` never waits: a full channel drops the event with a warning

use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::observability::event::{DiagnosticEvent, OwnedEvent, Severity};

/// Destination for diagnostic events.
pub trait EventSink: Send + Sync {
    fn log(&self, event: &DiagnosticEvent<'_>);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn log(&self, event: &DiagnosticEvent<'_>) {
        (**self).log(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn log(&self, event: &DiagnosticEvent<'_>) {
        (**self).log(event)
    }
}

/// Emits events through `tracing` under the `request_logger` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn log(&self, event: &DiagnosticEvent<'_>) {
        let ctx = &event.context;
        match event.severity {
            Severity::Info => tracing::info!(
                target: "request_logger",
                uid = %ctx.uid,
                milliseconds = ctx.milliseconds,
                "{}",
                event.message
            ),
            Severity::Error => tracing::error!(
                target: "request_logger",
                uid = %ctx.uid,
                milliseconds = ctx.milliseconds,
                exception = ctx.exception.map(tracing::field::display),
                "{}",
                event.message
            ),
        }
    }
}

/// Non-blocking handoff of owned events into a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<OwnedEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OwnedEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Drain `receiver` on a background task, writing one JSON object per line.
    ///
    /// The task ends once every sender has been dropped.
    pub fn spawn_json_writer<W>(
        mut receiver: mpsc::Receiver<OwnedEvent>,
        mut writer: W,
    ) -> JoinHandle<()>
    where
        W: Write + Send + 'static,
    {
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                let line = match serde_json::to_string(&event) {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialize diagnostic event");
                        continue;
                    }
                };
                if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                    tracing::error!(error = %e, "Failed to write diagnostic event");
                }
            }
        })
    }
}

impl EventSink for ChannelSink {
    fn log(&self, event: &DiagnosticEvent<'_>) {
        if let Err(e) = self.sender.try_send(OwnedEvent::from(event)) {
            tracing::warn!(uid = %event.context.uid, error = %e, "Dropping diagnostic event");
        }
    }
}
