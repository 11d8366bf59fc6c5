use crate::types::events::StreamEvent;
use crate::{BoxStream, Result};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

/// Aggregate of a fully consumed event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamTranscript {
    /// All text chunks concatenated in order, without separators
    pub text: String,
    pub conversation_id: Option<String>,
    pub chunks: usize,
}

impl StreamTranscript {
    pub fn push(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Text(t) => {
                self.text.push_str(&t);
                self.chunks += 1;
            }
            StreamEvent::ConversationId(id) => {
                if self.conversation_id.is_none() {
                    self.conversation_id = Some(id);
                }
            }
        }
    }
}

/// Drain `events` into a [`StreamTranscript`]. The first error aborts and is returned.
pub async fn collect_stream_text(
    mut events: BoxStream<'static, StreamEvent>,
) -> Result<StreamTranscript> {
    let mut transcript = StreamTranscript::default();
    while let Some(event) = events.next().await {
        transcript.push(event?);
    }
    Ok(transcript)
}
