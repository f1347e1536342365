//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggerConfig {
    /// How requests and responses are rendered into event messages.
    pub formatter: FormatterConfig,

    /// Where diagnostic events go.
    pub sink: SinkConfig,

    /// HTTP transport settings.
    pub transport: TransportConfig,

    /// Process-wide logging settings.
    pub observability: ObservabilityConfig,
}

/// Formatter variants.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// `GET / 1.1` style one-liners.
    #[default]
    Simple,
    /// Start line, headers and body preview.
    Full,
}

/// Formatter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub kind: FormatterKind,

    /// Maximum body bytes printed by the full formatter.
    pub max_body_length: usize,

    /// Render responses in the context of their request.
    pub request_aware: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            kind: FormatterKind::Simple,
            max_body_length: 1000,
            request_aware: true,
        }
    }
}

/// Event sink variants.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Emit `tracing` events.
    #[default]
    Tracing,
    /// Hand events to a channel drained as JSON lines on stdout.
    Json,
}

/// Event sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,

    /// Bounded channel capacity for the JSON sink.
    pub channel_capacity: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::Tracing,
            channel_capacity: 1024,
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Maximum buffered response body size in bytes.
    pub max_response_bytes: usize,

    /// Turn 4xx/5xx responses into errors carrying the response.
    pub fail_on_status: bool,

    /// With `fail_on_status`, only 5xx responses become errors.
    pub only_server_errors: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            max_response_bytes: 2 * 1024 * 1024, // 2MB
            fail_on_status: true,
            only_server_errors: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
