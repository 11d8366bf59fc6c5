use crate::pipeline::Pipeline;
use crate::request::RequestSpec;
use crate::transport::{HttpTransport, TransportConfig, TransportError};
use crate::types::events::StreamEvent;
use crate::{BoxStream, Error, Result};
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, warn};
use uuid::Uuid;

/// Executes a single streaming request per call.
///
/// Holds no per-request state; each [`execute`](Self::execute) opens its own
/// connection and the returned stream is independent of the executor.
pub struct StreamingRequestExecutor {
    transport: HttpTransport,
    pipeline: Pipeline,
}

impl StreamingRequestExecutor {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            pipeline: Pipeline::sse_lines(),
        })
    }

    /// Executor configured from `HTTP_STREAM_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&TransportConfig::from_env())
    }

    /// Send the request and return its events.
    ///
    /// Fails with [`Error::HttpStatus`] before yielding anything when the
    /// status is outside `[200, 300)`. The stream owns the response body;
    /// dropping it closes the connection. Errors after the first event end the
    /// stream.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<BoxStream<'static, StreamEvent>> {
        let invocation_id = Uuid::new_v4().to_string();
        self.execute_with_id(spec, &invocation_id).await
    }

    pub(crate) async fn execute_with_id(
        &self,
        spec: &RequestSpec,
        invocation_id: &str,
    ) -> Result<BoxStream<'static, StreamEvent>> {
        let resp = self
            .transport
            .execute_stream_response(spec, invocation_id)
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                invocation_id,
                status = status.as_u16(),
                url = spec.url(),
                "non-success status, aborting stream"
            );
            return Err(Error::http_status(status.as_u16(), status.canonical_reason()));
        }

        debug!(invocation_id, status = status.as_u16(), "streaming response body");

        let bytes = resp
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));

        let id = invocation_id.to_string();
        let events = self
            .pipeline
            .process_stream(Box::pin(bytes))
            .inspect(move |item| match item {
                Ok(event) => debug!(invocation_id = %id, ?event, "stream event"),
                Err(e) => warn!(invocation_id = %id, error = %e, "stream failed"),
            });

        Ok(Box::pin(events))
    }
}
