//! # http-request-stream
//!
//! A single plugin action: send an HTTP request, consume the server-sent-event
//! style response line by line, and hand each non-empty line back to the host
//! as a named message.
//!
//! ## Overview
//!
//! - **Fail fast**: URL, headers, body and method are validated before any I/O
//! - **Streaming-first**: the response body is read incrementally; the event
//!   stream owns the connection and closes it when dropped
//! - **SSE-lite**: only the `data:` prefix is interpreted; no `event:`, `id:` or
//!   `retry:` handling
//! - **In-band id**: the first `conversation_id/<value>` marker is reported
//!   separately from text
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use http_request_stream::tool::{HttpRequestStreamTool, Tool};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> http_request_stream::Result<()> {
//!     let tool = HttpRequestStreamTool::from_env()?;
//!     let params = serde_json::json!({
//!         "url": "https://example.com/events",
//!         "method": "POST",
//!         "body": "{\"query\":\"hello\"}",
//!     });
//!
//!     let mut messages = tool.invoke(params.as_object().unwrap()).await?;
//!     while let Some(msg) = messages.next().await {
//!         let msg = msg?;
//!         println!("{} = {}", msg.variable_name, msg.variable_value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Parameter validation and effective headers |
//! | [`client`] | The streaming request executor |
//! | [`transport`] | `reqwest` client and timeout policy |
//! | [`pipeline`] | Line decoding and event mapping |
//! | [`tool`] | Host-facing tool trait, implementation and manifest |
//! | [`types`] | Stream events and host messages |

pub mod client;
pub mod pipeline;
pub mod request;
pub mod tool;
pub mod transport;
pub mod types;

pub use client::{collect_stream_text, StreamTranscript, StreamingRequestExecutor};
pub use request::{EffectiveHeaders, RequestSpec};
pub use tool::{HttpRequestStreamTool, Tool, ToolManifest};
pub use transport::TransportConfig;
pub use types::{StreamEvent, ToolInvokeMessage};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, Stage};
