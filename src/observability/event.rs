//! Diagnostic events emitted by the interceptor.

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event severity. Start and success events are `Info`; failures are `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Correlation token tying a start event to its completion event.
///
/// Backed by a random UUID, so minting one needs no shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(Uuid);

impl Uid {
    /// Mint a fresh token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Structured context attached to an event.
///
/// Key set per event kind:
/// - start: `uid`
/// - success: `uid`, `milliseconds`
/// - failure (with or without response): `uid`, `milliseconds`, `exception`
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub uid: Uid,
    pub milliseconds: Option<u64>,
    pub exception: Option<&'a (dyn Error + Send + Sync + 'static)>,
}

impl<'a> EventContext<'a> {
    pub fn start(uid: Uid) -> Self {
        Self {
            uid,
            milliseconds: None,
            exception: None,
        }
    }

    pub fn completed(uid: Uid, milliseconds: u64) -> Self {
        Self {
            uid,
            milliseconds: Some(milliseconds),
            exception: None,
        }
    }

    pub fn failed(
        uid: Uid,
        milliseconds: u64,
        exception: &'a (dyn Error + Send + Sync + 'static),
    ) -> Self {
        Self {
            uid,
            milliseconds: Some(milliseconds),
            exception: Some(exception),
        }
    }

    /// Keys present in this context, in a stable order.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = vec!["uid"];
        if self.milliseconds.is_some() {
            keys.push("milliseconds");
        }
        if self.exception.is_some() {
            keys.push("exception");
        }
        keys
    }
}

/// A single diagnostic record handed to an [`EventSink`](crate::observability::EventSink).
#[derive(Debug, Clone)]
pub struct DiagnosticEvent<'a> {
    pub severity: Severity,
    pub message: String,
    pub context: EventContext<'a>,
}

impl<'a> DiagnosticEvent<'a> {
    pub fn info(message: String, context: EventContext<'a>) -> Self {
        Self {
            severity: Severity::Info,
            message,
            context,
        }
    }

    pub fn error(message: String, context: EventContext<'a>) -> Self {
        Self {
            severity: Severity::Error,
            message,
            context,
        }
    }
}

/// Owned, serializable copy of a [`DiagnosticEvent`] for sinks that outlive the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedEvent {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub uid: Uid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl From<&DiagnosticEvent<'_>> for OwnedEvent {
    fn from(event: &DiagnosticEvent<'_>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity: event.severity,
            message: event.message.clone(),
            uid: event.context.uid,
            milliseconds: event.context.milliseconds,
            exception: event.context.exception.map(|e| e.to_string()),
        }
    }
}
