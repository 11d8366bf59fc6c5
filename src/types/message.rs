//! Messages handed to the plugin host.

use crate::types::events::StreamEvent;
use serde::{Deserialize, Serialize};

/// Variable name carrying streamed text chunks.
pub const STREAM_TEXT_VARIABLE: &str = "stream_text";

/// Variable name carrying the extracted conversation identifier.
pub const CONVERSATION_ID_VARIABLE: &str = "conversation_id";

/// A named variable message, as consumed by the host that displays tool output.
///
/// `stream` marks chunks the host should append to a running variable rather
/// than assign once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvokeMessage {
    pub variable_name: String,
    pub variable_value: String,
    pub stream: bool,
}

impl ToolInvokeMessage {
    pub fn stream_variable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable_name: name.into(),
            variable_value: value.into(),
            stream: true,
        }
    }

    pub fn variable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable_name: name.into(),
            variable_value: value.into(),
            stream: false,
        }
    }
}

impl From<StreamEvent> for ToolInvokeMessage {
    fn from(event: StreamEvent) -> Self {
        match event {
            StreamEvent::Text(text) => Self::stream_variable(STREAM_TEXT_VARIABLE, text),
            StreamEvent::ConversationId(id) => Self::variable(CONVERSATION_ID_VARIABLE, id),
        }
    }
}
