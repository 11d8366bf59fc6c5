//! Streaming request execution.
//!
//! [`StreamingRequestExecutor`] runs one validated [`RequestSpec`](crate::request::RequestSpec)
//! through the transport and the line pipeline. [`collect_stream_text`] drains
//! the resulting stream when the caller wants the whole text at once.

mod executor;
mod transcript;

pub use executor::StreamingRequestExecutor;
pub use transcript::{collect_stream_text, StreamTranscript};
