//! Send one HTTP request through the logging pipeline.
//!
//! ```text
//! request-logger [-c CONFIG] [-X METHOD] [-H "Name: value"]... [-d BODY] URL
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, Method, Request};
use clap::Parser;
use tokio::task::JoinHandle;
use tower::{ServiceBuilder, ServiceExt};

use request_logger::config::{load_config, LoggerConfig, SinkKind};
use request_logger::message::{ConfiguredFormatter, Rendering};
use request_logger::observability::{init_logging, ChannelSink, EventSink, TracingSink};
use request_logger::{ClientError, HyperTransport, LoggerLayer, LoggerPlugin, StatusErrorLayer};

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "Send an HTTP request and log it", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request method.
    #[arg(short = 'X', long, default_value = "GET")]
    method: Method,

    /// Request header, `Name: value`. May be repeated.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(HeaderName, HeaderValue)>,

    /// Request body.
    #[arg(short, long)]
    data: Option<String>,

    /// Absolute request URL.
    url: String,
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{}`", raw))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| e.to_string())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|e| e.to_string())?;
    Ok((name, value))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    init_logging(&config.observability)?;

    let mut builder = Request::builder().method(cli.method.clone()).uri(&cli.url);
    for (name, value) in &cli.headers {
        builder = builder.header(name, value);
    }
    let request = builder.body(cli.data.clone().map(Bytes::from).unwrap_or_default())?;

    let (sink, writer) = build_sink(&config);
    let formatter = ConfiguredFormatter::from_config(&config.formatter);

    let result = if config.formatter.request_aware {
        send(&config, LoggerPlugin::with_request_aware_formatter(sink, formatter), request).await
    } else {
        send(&config, LoggerPlugin::with_formatter(sink, formatter), request).await
    };

    // Every sender is gone once the pipeline is dropped; let the writer drain.
    if let Some(writer) = writer {
        writer.await?;
    }

    match result {
        Ok(body) => {
            let mut stdout = std::io::stdout();
            stdout.write_all(&body)?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn build_sink(config: &LoggerConfig) -> (Arc<dyn EventSink>, Option<JoinHandle<()>>) {
    match config.sink.kind {
        SinkKind::Tracing => (Arc::new(TracingSink), None),
        SinkKind::Json => {
            let (sink, receiver) = ChannelSink::new(config.sink.channel_capacity);
            let writer = ChannelSink::spawn_json_writer(receiver, std::io::stdout());
            (Arc::new(sink), Some(writer))
        }
    }
}

async fn send<R>(
    config: &LoggerConfig,
    plugin: LoggerPlugin<Arc<dyn EventSink>, R>,
    request: Request<Bytes>,
) -> Result<Bytes, ClientError>
where
    R: Rendering + 'static,
{
    let service = ServiceBuilder::new()
        .layer(LoggerLayer::new(plugin))
        .layer(StatusErrorLayer::from_config(&config.transport))
        .service(HyperTransport::new(&config.transport));

    let response = service.oneshot(request).await?;
    Ok(response.into_body())
}
