//! Streaming response pipeline.
//!
//! ```text
//! Raw Bytes → Decoder → Lines → Mapper → StreamEvents
//!     │          │                 │
//!   HTTP     CR/LF split,     data: strip, blank skip,
//!   body     lossy UTF-8      conversation_id extraction
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Decoder + mapper applied to a response byte stream |
//! | [`Decoder`] | Bytes to lines ([`decode::LineDecoder`]) |
//! | [`Mapper`] | Lines to events ([`event_map::SseLineMapper`]) |

pub mod decode;
pub mod event_map;


use crate::types::events::StreamEvent;
use crate::BoxStream;
use bytes::Bytes;

/// Splits a byte stream into text lines.
pub trait Decoder: Send + Sync {
    fn decode_stream(&self, input: BoxStream<'static, Bytes>) -> BoxStream<'static, String>;
}

/// Maps text lines to events. Each call starts with fresh per-stream state.
pub trait Mapper: Send + Sync {
    fn map(&self, input: BoxStream<'static, String>) -> BoxStream<'static, StreamEvent>;
}

/// Pipeline that turns a response body into events
pub struct Pipeline {
    decoder: Box<dyn Decoder>,
    mapper: Box<dyn Mapper>,
}

impl Pipeline {
    pub fn new(decoder: Box<dyn Decoder>, mapper: Box<dyn Mapper>) -> Self {
        Self { decoder, mapper }
    }

    /// Line decoding followed by SSE `data:` handling.
    pub fn sse_lines() -> Self {
        Self::new(
            Box::new(decode::LineDecoder),
            Box::new(event_map::SseLineMapper),
        )
    }

    /// The returned stream owns `input`; dropping it releases the source.
    pub fn process_stream(&self, input: BoxStream<'static, Bytes>) -> BoxStream<'static, StreamEvent> {
        let lines = self.decoder.decode_stream(input);
        self.mapper.map(lines)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::sse_lines()
    }
}
