//! End-to-end runs through the hyper transport.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{Request, StatusCode};
use request_logger::config::TransportConfig;
use request_logger::observability::Severity;
use request_logger::{ClientError, HyperTransport, LoggerLayer, LoggerPlugin, StatusErrorLayer};
use tower::{ServiceBuilder, ServiceExt};

mod common;

use common::RecordingSink;

fn get(url: String) -> Request<Bytes> {
    Request::builder().uri(url).body(Bytes::new()).unwrap()
}

#[tokio::test]
async fn test_success_through_transport() {
    let backend = common::start_programmable_backend(|| async { (200, "hello".to_string()) }).await;
    let sink = RecordingSink::default();

    let svc = ServiceBuilder::new()
        .layer(LoggerLayer::new(LoggerPlugin::new(sink.clone())))
        .layer(StatusErrorLayer::new())
        .service(HyperTransport::new(&TransportConfig::default()));

    let url = format!("http://{}/", backend);
    let response = svc.oneshot(get(url.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), &Bytes::from_static(b"hello"));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].message, format!("Sending request:\nGET {} 1.1", url));
    assert_eq!(events[1].severity, Severity::Info);
    assert_eq!(events[1].message, "Received response:\n200 OK 1.1");
    assert_eq!(events[0].uid, events[1].uid);
}

#[tokio::test]
async fn test_server_error_logged_with_response() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let backend = common::start_programmable_backend(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (503, "down".to_string())
        }
    })
    .await;
    let sink = RecordingSink::default();

    let svc = ServiceBuilder::new()
        .layer(LoggerLayer::new(LoggerPlugin::new(sink.clone())))
        .layer(StatusErrorLayer::new())
        .service(HyperTransport::new(&TransportConfig::default()));

    let err = svc
        .oneshot(get(format!("http://{}/status", backend)))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Service Unavailable");
    let response = err.into_response().unwrap();
    assert_eq!(response.body(), &Bytes::from_static(b"down"));
    assert_eq!(hits.load(Ordering::SeqCst), 1, "interceptor must not retry");

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].severity, Severity::Error);
    assert_eq!(
        events[1].message,
        "Error:\nService Unavailable\nwith response:\n503 Service Unavailable 1.1"
    );
    assert_eq!(events[1].exception.as_deref(), Some("Service Unavailable"));
}

#[tokio::test]
async fn test_connection_refused_logged_without_response() {
    let addr = common::closed_port().await;
    let sink = RecordingSink::default();

    let svc = ServiceBuilder::new()
        .layer(LoggerLayer::new(LoggerPlugin::new(sink.clone())))
        .layer(StatusErrorLayer::new())
        .service(HyperTransport::new(&TransportConfig::default()));

    let url = format!("http://{}/", addr);
    let err = svc.oneshot(get(url.clone())).await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
    let cause = err.to_string().to_lowercase();
    assert!(cause.contains("connection refused"), "missing cause in {:?}", cause);

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].severity, Severity::Error);
    assert!(events[1].message.starts_with(&format!("Error:\n{}\n", err)));
    assert!(events[1]
        .message
        .ends_with(&format!("\nwhen sending request:\nGET {} 1.1", url)));
    assert_eq!(events[1].exception, Some(err.to_string()));
}

#[tokio::test]
async fn test_oversized_error_body_keeps_response() {
    let backend =
        common::start_programmable_backend(|| async { (503, "x".repeat(64)) }).await;
    let sink = RecordingSink::default();
    let config = TransportConfig {
        max_response_bytes: 16,
        ..TransportConfig::default()
    };

    let svc = ServiceBuilder::new()
        .layer(LoggerLayer::new(LoggerPlugin::new(sink.clone())))
        .layer(StatusErrorLayer::from_config(&config))
        .service(HyperTransport::new(&config));

    let err = svc
        .oneshot(get(format!("http://{}/", backend)))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(err.to_string(), "Response body exceeds 16 bytes");
    let response = err.into_response().unwrap();
    assert_eq!(response.body().len(), 16);

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].severity, Severity::Error);
    assert_eq!(
        events[1].message,
        "Error:\nResponse body exceeds 16 bytes\nwith response:\n503 Service Unavailable 1.1"
    );
}

#[tokio::test]
async fn test_relative_uri_is_request_error() {
    let sink = RecordingSink::default();

    let svc = ServiceBuilder::new()
        .layer(LoggerLayer::new(LoggerPlugin::new(sink.clone())))
        .service(HyperTransport::new(&TransportConfig::default()));

    let err = svc.oneshot(get("/relative".to_string())).await.unwrap_err();
    assert!(matches!(err, ClientError::Request { .. }));

    let events = sink.events();
    assert_eq!(
        events[1].message,
        "Error:\nRequest URI must be absolute, got \"/relative\"\n\
         when sending request:\nGET /relative 1.1"
    );
}

#[tokio::test]
async fn test_status_passthrough_when_disabled() {
    let backend =
        common::start_programmable_backend(|| async { (404, "missing".to_string()) }).await;
    let sink = RecordingSink::default();
    let config = TransportConfig {
        fail_on_status: false,
        ..TransportConfig::default()
    };

    let svc = ServiceBuilder::new()
        .layer(LoggerLayer::new(LoggerPlugin::new(sink.clone())))
        .layer(StatusErrorLayer::from_config(&config))
        .service(HyperTransport::new(&config));

    let response = svc
        .oneshot(get(format!("http://{}/", backend)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let events = sink.events();
    assert_eq!(events[1].severity, Severity::Info);
    assert_eq!(events[1].message, "Received response:\n404 Not Found 1.1");
}
