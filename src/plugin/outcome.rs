//! Per-call state and outcome classification.

use std::time::{Duration, Instant};

use axum::http::Response;

use crate::observability::Uid;
use crate::transport::TransportError;

/// Context of a single intercepted call; dropped once its completion event is emitted.
#[derive(Debug)]
pub struct Invocation {
    pub uid: Uid,
    started: Instant,
}

impl Invocation {
    /// Start timing a call under a fresh uid.
    pub fn start() -> Self {
        Self {
            uid: Uid::new(),
            started: Instant::now(),
        }
    }

    /// Monotonic time since `start`, rounded to the nearest millisecond.
    pub fn elapsed_ms(&self) -> u64 {
        round_ms(self.started.elapsed())
    }
}

/// Whole milliseconds in `elapsed`, halves rounded up.
pub fn round_ms(elapsed: Duration) -> u64 {
    u64::try_from((elapsed.as_micros() + 500) / 1000).unwrap_or(u64::MAX)
}

/// What the downstream stage settled with.
#[derive(Debug)]
pub enum Outcome<'a, B, E> {
    Success(&'a Response<B>),
    Failure(&'a E),
    FailureWithResponse(&'a E, &'a Response<B>),
}

impl<'a, B, E> Outcome<'a, B, E>
where
    E: TransportError<Body = B>,
{
    /// Classify a settled result. An error carrying a response is always
    /// `FailureWithResponse`.
    pub fn classify(result: &'a Result<Response<B>, E>) -> Self {
        match result {
            Ok(response) => Outcome::Success(response),
            Err(error) => match error.response() {
                Some(response) => Outcome::FailureWithResponse(error, response),
                None => Outcome::Failure(error),
            },
        }
    }
}
