//! Core data types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StreamEvent`] | Text chunk or extracted conversation id |
//! | [`ToolInvokeMessage`] | Named variable message handed to the plugin host |

pub mod events;
pub mod message;

pub use events::StreamEvent;
pub use message::{ToolInvokeMessage, CONVERSATION_ID_VARIABLE, STREAM_TEXT_VARIABLE};
