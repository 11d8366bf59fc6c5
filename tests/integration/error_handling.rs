//! Integration tests for error handling

use crate::integration::mock_server::MockServerFixture;
use futures::StreamExt;
use http_request_stream::tool::Tool;
use http_request_stream::{Error, HttpRequestStreamTool, StreamEvent, TransportConfig};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_not_found_fails_with_status() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_error_response("/missing", 404, r#"{"error":"not found"}"#)
        .await;

    let result = fixture
        .tool()
        .invoke(&fixture.params("/missing", json!({})))
        .await;

    match result {
        Err(Error::HttpStatus { status, .. }) => assert_eq!(status, 404),
        Err(other) => panic!("expected HttpStatus, got {other:?}"),
        Ok(_) => panic!("expected HttpStatus, got a stream"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_and_redirect_status() {
    let mut fixture = MockServerFixture::new().await;
    let _err = fixture.mock_error_response("/boom", 500, "{}").await;
    let _redirect = fixture
        .server
        .mock("GET", "/moved")
        .with_status(304)
        .create_async()
        .await;

    for (path, expected) in [("/boom", 500), ("/moved", 304)] {
        let err = match fixture
            .tool()
            .invoke_events(&fixture.params(path, json!({})))
            .await
        {
            Ok(_) => panic!("{path} should fail"),
            Err(e) => e,
        };
        assert_eq!(err.status(), Some(expected));
    }
}

#[tokio::test]
async fn test_invalid_input_never_reaches_server() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tool = fixture.tool();
    let cases = [
        json!({ "headers": "[1,2]" }),
        json!({ "headers": "not json" }),
        json!({ "body": "{not json" }),
        json!({ "method": "BAD METHOD" }),
        json!({ "headers": "{\"X-Bad\":\"a\\nb\"}" }),
    ];
    for extra in cases {
        let err = match tool.invoke(&fixture.params("/sse", extra.clone())).await {
            Ok(_) => panic!("{extra} should be rejected"),
            Err(e) => e,
        };
        assert!(err.is_invalid_input(), "{extra}: {err:?}");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let tool = HttpRequestStreamTool::new(
        &TransportConfig::default().with_connect_timeout(Duration::from_secs(2)),
    )
    .unwrap();
    let params = json!({ "url": "http://127.0.0.1:1/sse" })
        .as_object()
        .cloned()
        .unwrap();

    let err = match tool.invoke(&params).await {
        Ok(_) => panic!("connection to port 1 should fail"),
        Err(e) => e,
    };
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn test_redirect_is_reported_not_followed() {
    let mut fixture = MockServerFixture::new().await;
    let start = fixture
        .server
        .mock("POST", "/start")
        .with_status(302)
        .with_header("location", "/final")
        .create_async()
        .await;
    let target = fixture
        .server
        .mock("GET", "/final")
        .with_status(200)
        .with_body("data: redirected\n")
        .expect(0)
        .create_async()
        .await;

    let params = fixture.params(
        "/start",
        json!({ "method": "POST", "body": "{\"q\":1}" }),
    );
    let err = match fixture.tool().invoke_events(&params).await {
        Ok(_) => panic!("302 should not be followed"),
        Err(e) => e,
    };

    assert!(matches!(err, Error::HttpStatus { status: 302, .. }), "got {err:?}");
    start.assert_async().await;
    target.assert_async().await;
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced_and_streaming_continues() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/bytes")
        .with_status(200)
        .with_body(b"data: caf\xe9\ndata: next\n".as_slice())
        .create_async()
        .await;

    let events: Vec<_> = fixture
        .tool()
        .invoke_events(&fixture.params("/bytes", json!({})))
        .await
        .unwrap()
        .map(|e| e.unwrap())
        .collect()
        .await;

    assert_eq!(
        events,
        vec![StreamEvent::text("caf\u{FFFD}"), StreamEvent::text("next")]
    );
}
