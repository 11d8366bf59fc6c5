//! Events produced while consuming a streaming response.

use serde::{Deserialize, Serialize};

/// One item derived from the response body.
///
/// `ConversationId` appears at most once per invocation; `Text` any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A non-empty line with any `data:` prefix removed
    Text(String),
    /// Identifier captured from an in-band `conversation_id/<value>` marker
    ConversationId(String),
}

impl StreamEvent {
    pub fn text(value: impl Into<String>) -> Self {
        StreamEvent::Text(value.into())
    }

    pub fn conversation_id(value: impl Into<String>) -> Self {
        StreamEvent::ConversationId(value.into())
    }
}
