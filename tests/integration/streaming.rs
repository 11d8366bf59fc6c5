//! Integration tests for streaming responses

use crate::integration::mock_server::MockServerFixture;
use futures::StreamExt;
use http_request_stream::tool::Tool;
use http_request_stream::{collect_stream_text, StreamEvent, ToolInvokeMessage};
use serde_json::json;

#[tokio::test]
async fn test_sse_lines_become_text_messages() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_stream("GET", "/sse", "data: hello\n\ndata: world\n\n")
        .await;

    let tool = fixture.tool();
    let messages: Vec<ToolInvokeMessage> = tool
        .invoke(&fixture.params("/sse", json!({})))
        .await
        .unwrap()
        .map(|m| m.unwrap())
        .collect()
        .await;

    assert_eq!(
        messages,
        vec![
            ToolInvokeMessage::stream_variable("stream_text", "hello"),
            ToolInvokeMessage::stream_variable("stream_text", "world"),
        ]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/sse")
        .match_header("accept", "text/event-stream")
        .match_header("cache-control", "no-cache")
        .with_status(200)
        .with_body("data: ok\n")
        .create_async()
        .await;

    let events: Vec<_> = fixture
        .tool()
        .invoke_events(&fixture.params("/sse", json!({})))
        .await
        .unwrap()
        .map(|e| e.unwrap())
        .collect()
        .await;

    assert_eq!(events, vec![StreamEvent::text("ok")]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_user_header_overrides_default() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_stream_with_header("/sse", "accept", "application/json", "data: json\n")
        .await;

    let params = fixture.params(
        "/sse",
        json!({ "headers": "{\"Accept\":\"application/json\",\"X-Client\":7}" }),
    );
    let events: Vec<_> = fixture
        .tool()
        .invoke_events(&params)
        .await
        .unwrap()
        .map(|e| e.unwrap())
        .collect()
        .await;

    assert_eq!(events, vec![StreamEvent::text("json")]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_json_body_is_forwarded() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_stream_with_json_body(
            "/chat",
            json!({"query": "hi", "stream": true}),
            "data: answer\n",
        )
        .await;

    let params = fixture.params(
        "/chat",
        json!({ "method": "post", "body": "{\"query\":\"hi\",\"stream\":true}" }),
    );
    let events: Vec<_> = fixture
        .tool()
        .invoke_events(&params)
        .await
        .unwrap()
        .map(|e| e.unwrap())
        .collect()
        .await;

    assert_eq!(events, vec![StreamEvent::text("answer")]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_conversation_id_reported_once() {
    let mut fixture = MockServerFixture::new().await;
    let body = "data: start\n\
                data: see conversation_id/abc123 for details\n\
                data: middle\n\
                data: conversation_id/xyz\n\
                data: end\n";
    let _mock = fixture.mock_stream("GET", "/sse", body).await;

    let messages: Vec<_> = fixture
        .tool()
        .invoke(&fixture.params("/sse", json!({})))
        .await
        .unwrap()
        .map(|m| m.unwrap())
        .collect()
        .await;

    let ids: Vec<_> = messages
        .iter()
        .filter(|m| m.variable_name == "conversation_id")
        .map(|m| m.variable_value.as_str())
        .collect();
    assert_eq!(ids, vec!["abc123"]);

    let texts: Vec<_> = messages
        .iter()
        .filter(|m| m.variable_name == "stream_text")
        .map(|m| m.variable_value.as_str())
        .collect();
    assert_eq!(texts, vec!["start", "middle", "end"]);
}

#[tokio::test]
async fn test_plain_lines_and_crlf() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_stream("GET", "/plain", "first\r\n  second  \r\n\r\ndata:third")
        .await;

    let transcript = collect_stream_text(
        fixture
            .tool()
            .invoke_events(&fixture.params("/plain", json!({})))
            .await
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(transcript.text, "firstsecondthird");
    assert_eq!(transcript.chunks, 3);
    assert!(transcript.conversation_id.is_none());
}

#[tokio::test]
async fn test_empty_body_yields_no_events() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_stream("GET", "/empty", "").await;

    let count = fixture
        .tool()
        .invoke_events(&fixture.params("/empty", json!({})))
        .await
        .unwrap()
        .count()
        .await;

    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_streaming_cancellation() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_long_stream("/long", 500).await;

    let tool = fixture.tool();
    let mut events = tool
        .invoke_events(&fixture.params("/long", json!({})))
        .await
        .unwrap();

    let first = events.next().await.unwrap().unwrap();
    assert_eq!(first, StreamEvent::text("line 0"));
    drop(events);

    // The tool stays usable after a stream is abandoned.
    let second_run: Vec<_> = tool
        .invoke_events(&fixture.params("/long", json!({})))
        .await
        .unwrap()
        .take(2)
        .map(|e| e.unwrap())
        .collect()
        .await;
    assert_eq!(
        second_run,
        vec![StreamEvent::text("line 0"), StreamEvent::text("line 1")]
    );
}
