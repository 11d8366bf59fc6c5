//! Plugin-facing tool surface.
//!
//! A host registers a [`Tool`], calls [`Tool::invoke`] with the raw parameter
//! mapping and displays the returned [`ToolInvokeMessage`](crate::types::ToolInvokeMessage)s.

pub mod http_request_stream;
pub mod manifest;

pub use http_request_stream::HttpRequestStreamTool;
pub use manifest::ToolManifest;

use crate::types::message::ToolInvokeMessage;
use crate::{BoxStream, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Parameter mapping as delivered by the host.
pub type ToolParameters = Map<String, Value>;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Run the tool once. Input errors are returned before any I/O; the
    /// returned stream is lazy and consumed at most once.
    async fn invoke(
        &self,
        parameters: &ToolParameters,
    ) -> Result<BoxStream<'static, ToolInvokeMessage>>;
}
