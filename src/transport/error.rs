//! Transport error taxonomy.

use std::error::Error;

use axum::body::Bytes;
use axum::http::{Response, StatusCode};
use thiserror::Error;

type BoxError = Box<dyn Error + Send + Sync>;

/// An error raised by a pipeline stage.
///
/// Errors that represent an application-level failure carry the response
/// that triggered them; transport failures have none.
pub trait TransportError: Error + Send + Sync + 'static {
    type Body;

    fn response(&self) -> Option<&Response<Self::Body>>;
}

/// Errors produced by the HTTP client pipeline.
#[derive(Debug, Error)]
pub enum ClientError<B = Bytes> {
    /// No response could be obtained (connection refused, DNS, reset, ...).
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The request could not be sent as built.
    #[error("{message}")]
    Request { message: String },

    /// A response was received but its status signals failure.
    #[error("{message}")]
    Http { message: String, response: Response<B> },
}

impl<B> ClientError<B> {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a lower-level failure. The message joins the whole `source()`
    /// chain with `": "`, skipping causes a parent already printed.
    pub fn network_from(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        let mut message = source.to_string();
        let mut cause = source.source();
        while let Some(err) = cause {
            let text = err.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            cause = err.source();
        }

        ClientError::Network {
            message,
            source: Some(source),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        ClientError::Request {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>, response: Response<B>) -> Self {
        ClientError::Http {
            message: message.into(),
            response,
        }
    }

    /// Status of the attached response, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { response, .. } => Some(response.status()),
            _ => None,
        }
    }

    /// Take the attached response, if any.
    pub fn into_response(self) -> Option<Response<B>> {
        match self {
            ClientError::Http { response, .. } => Some(response),
            _ => None,
        }
    }
}

impl<B> TransportError for ClientError<B>
where
    B: std::fmt::Debug + Send + Sync + 'static,
{
    type Body = B;

    fn response(&self) -> Option<&Response<B>> {
        match self {
            ClientError::Http { response, .. } => Some(response),
            _ => None,
        }
    }
}
