use crate::client::StreamingRequestExecutor;
use crate::request::RequestSpec;
use crate::tool::{Tool, ToolParameters};
use crate::transport::TransportConfig;
use crate::types::events::StreamEvent;
use crate::types::message::ToolInvokeMessage;
use crate::{BoxStream, Result};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::warn;
use uuid::Uuid;

pub const TOOL_NAME: &str = "http_request_stream";

/// Streams an HTTP response back to the host as `stream_text` /
/// `conversation_id` variable messages.
pub struct HttpRequestStreamTool {
    executor: StreamingRequestExecutor,
}

impl HttpRequestStreamTool {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Ok(Self {
            executor: StreamingRequestExecutor::new(config)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&TransportConfig::from_env())
    }

    /// Same as [`Tool::invoke`] but yields the typed events.
    pub async fn invoke_events(
        &self,
        parameters: &ToolParameters,
    ) -> Result<BoxStream<'static, StreamEvent>> {
        let invocation_id = Uuid::new_v4().to_string();
        let spec = RequestSpec::from_parameters(parameters).map_err(|e| {
            warn!(invocation_id = %invocation_id, error = %e, "rejected tool parameters");
            e
        })?;
        self.executor.execute_with_id(&spec, &invocation_id).await
    }
}

#[async_trait]
impl Tool for HttpRequestStreamTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    async fn invoke(
        &self,
        parameters: &ToolParameters,
    ) -> Result<BoxStream<'static, ToolInvokeMessage>> {
        let events = self.invoke_events(parameters).await?;
        Ok(Box::pin(
            events.map(|item| item.map(ToolInvokeMessage::from)),
        ))
    }
}
