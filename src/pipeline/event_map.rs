//! Event mapping (line -> StreamEvent)
//!
//! Per line: trim, strip one `data:` prefix, skip blanks. A line carrying a
//! `conversation_id/<value>` marker is never forwarded as text; the first
//! marker of the stream becomes a [`StreamEvent::ConversationId`].

use crate::pipeline::Mapper;
use crate::types::events::StreamEvent;
use crate::BoxStream;
use futures::{future, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const DATA_PREFIX: &str = "data:";

static CONVERSATION_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"conversation_id/(\S+)").expect("conversation_id pattern is valid")
});

/// Strip surrounding whitespace and one leading `data:` prefix.
pub fn strip_data_prefix(line: &str) -> &str {
    let line = line.trim();
    match line.strip_prefix(DATA_PREFIX) {
        Some(rest) => rest.trim(),
        None => line,
    }
}

/// Captured value of the first `conversation_id/<non-whitespace>` run in `line`.
pub fn find_conversation_id(line: &str) -> Option<&str> {
    CONVERSATION_ID_PATTERN
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Per-stream line classifier.
#[derive(Debug, Default)]
pub struct LineEventMapper {
    conversation_id_seen: bool,
}

impl LineEventMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one raw line. `None` means the line produces no event.
    pub fn map_line(&mut self, raw: &str) -> Option<StreamEvent> {
        let line = strip_data_prefix(raw);
        if line.is_empty() {
            return None;
        }

        if let Some(id) = find_conversation_id(line) {
            if self.conversation_id_seen {
                debug!(conversation_id = id, "ignoring repeated conversation_id marker");
                return None;
            }
            self.conversation_id_seen = true;
            return Some(StreamEvent::conversation_id(id));
        }

        Some(StreamEvent::text(line))
    }
}

/// [`Mapper`] applying [`LineEventMapper`] to every line of a stream.
pub struct SseLineMapper;

impl Mapper for SseLineMapper {
    fn map(&self, input: BoxStream<'static, String>) -> BoxStream<'static, StreamEvent> {
        let mut mapper = LineEventMapper::new();
        let stream = input.filter_map(move |item| {
            let out = match item {
                Ok(line) => mapper.map_line(&line).map(Ok),
                Err(e) => Some(Err(e)),
            };
            future::ready(out)
        });
        Box::pin(stream)
    }
}
