//! Line-oriented SSE decoder (bytes -> JSON frames).
//!
//! Bytes are buffered until a `\n` arrives, so a frame split across reads (or a
//! multi-byte character split across chunks) is only decoded once complete.
//! Rules per line, after trimming:
//! - blank lines are skipped
//! - `data: [DONE]` terminates the stream
//! - `data: <json>` yields one frame; malformed JSON or invalid UTF-8 is fatal
//! - anything else (`event:`, `id:`, comments) is ignored

use crate::{Error, Result};
use serde_json::Value;
use tracing::debug;

pub const DATA_PREFIX: &str = "data: ";
pub const DONE_LINE: &str = "data: [DONE]";

/// Reader state. Once left, `Reading` is never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Reading,
    Terminated,
    Errored,
}

#[derive(Debug)]
pub struct SseLineDecoder {
    buf: Vec<u8>,
    state: StreamState,
    eof: bool,
    sentinel: bool,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            state: StreamState::Reading,
            eof: false,
            sentinel: false,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Whether the stream ended on `data: [DONE]` rather than end of body.
    pub fn terminated_by_sentinel(&self) -> bool {
        self.sentinel
    }

    /// Append a chunk read from the body. Ignored once the stream has left `Reading`.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.state == StreamState::Reading && !self.eof {
            self.buf.extend_from_slice(chunk);
        }
    }

    /// Mark end of body. A trailing line without `\n` is still decoded.
    pub fn finish(&mut self) {
        if self.state != StreamState::Reading || self.eof {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push(b'\n');
        }
        self.eof = true;
    }

    /// Force the `Errored` state after a transport or callback failure.
    pub fn fail(&mut self) {
        if self.state == StreamState::Reading {
            self.state = StreamState::Errored;
            self.buf.clear();
        }
    }

    /// Decode the next frame from complete buffered lines.
    ///
    /// `Ok(None)` means more input is needed, or the stream is no longer `Reading`.
    pub fn next_frame(&mut self) -> Result<Option<Value>> {
        while self.state == StreamState::Reading {
            let Some(pos) = self.buf.iter().position(|b| *b == b'\n') else {
                if self.eof {
                    self.state = StreamState::Terminated;
                }
                return Ok(None);
            };

            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(frame) = self.decode_line(&line[..pos])? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    fn decode_line(&mut self, raw: &[u8]) -> Result<Option<Value>> {
        let line = trim_ascii(raw);

        if line.is_empty() {
            return Ok(None);
        }

        if line == DONE_LINE.as_bytes() {
            self.state = StreamState::Terminated;
            self.sentinel = true;
            self.buf.clear();
            return Ok(None);
        }

        // Payload bytes go straight to serde_json so invalid UTF-8 fails the
        // stream instead of being replaced.
        match line.strip_prefix(DATA_PREFIX.as_bytes()) {
            Some(payload) => match serde_json::from_slice::<Value>(payload) {
                Ok(frame) => Ok(Some(frame)),
                Err(source) => {
                    self.state = StreamState::Errored;
                    self.buf.clear();
                    Err(Error::StreamDecode {
                        line: String::from_utf8_lossy(line).into_owned(),
                        source,
                    })
                }
            },
            None => {
                debug!(line = %String::from_utf8_lossy(line), "ignoring non-data stream line");
                Ok(None)
            }
        }
    }
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !first.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !last.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    bytes
}

impl Default for SseLineDecoder {
    fn default() -> Self {
        Self::new()
    }
}
