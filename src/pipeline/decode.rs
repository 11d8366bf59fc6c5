//! Line decoder (Bytes -> String)
//!
//! Buffers raw bytes across chunk boundaries and emits one `String` per line.
//! `\n`, `\r\n` and a lone `\r` all terminate a line. Lines are decoded as
//! UTF-8 only once complete, so a multi-byte character split across chunks is
//! reassembled before decoding. Invalid sequences become U+FFFD and the stream
//! goes on.

use crate::pipeline::Decoder;
use crate::BoxStream;
use bytes::Bytes;
use futures::{stream, StreamExt};
use tracing::debug;

pub struct LineDecoder;

struct DecodeState {
    input: BoxStream<'static, Bytes>,
    buf: Vec<u8>,
    eof: bool,
    failed: bool,
}

impl Decoder for LineDecoder {
    fn decode_stream(&self, input: BoxStream<'static, Bytes>) -> BoxStream<'static, String> {
        let state = DecodeState {
            input,
            buf: Vec::new(),
            eof: false,
            failed: false,
        };

        let stream = stream::unfold(state, |mut st| async move {
            if st.failed {
                return None;
            }

            loop {
                if let Some(raw) = take_line(&mut st.buf, st.eof) {
                    return Some((Ok(decode_lossy(raw)), st));
                }

                if st.eof {
                    // Trailing line without terminator.
                    if st.buf.is_empty() {
                        return None;
                    }
                    let raw = std::mem::take(&mut st.buf);
                    return Some((Ok(decode_lossy(raw)), st));
                }

                match st.input.next().await {
                    Some(Ok(bytes)) => st.buf.extend_from_slice(&bytes),
                    Some(Err(e)) => {
                        st.failed = true;
                        return Some((Err(e), st));
                    }
                    None => st.eof = true,
                }
            }
        });

        Box::pin(stream)
    }
}

/// Remove and return the first complete line in `buf`, without its terminator.
///
/// A `\r` at the very end of the buffer is held back until more data (or EOF)
/// shows whether a `\n` follows.
fn take_line(buf: &mut Vec<u8>, eof: bool) -> Option<Vec<u8>> {
    let pos = buf.iter().position(|b| *b == b'\n' || *b == b'\r')?;

    let terminator_len = if buf[pos] == b'\r' {
        match buf.get(pos + 1) {
            Some(b'\n') => 2,
            Some(_) => 1,
            None if eof => 1,
            None => return None,
        }
    } else {
        1
    };

    let line = buf[..pos].to_vec();
    buf.drain(..pos + terminator_len);
    Some(line)
}

fn decode_lossy(raw: Vec<u8>) -> String {
    match String::from_utf8(raw) {
        Ok(line) => line,
        Err(e) => {
            debug!(error = %e.utf8_error(), "replacing invalid UTF-8 in response line");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
