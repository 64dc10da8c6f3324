//! Streaming response handling.
//!
//! Two surfaces over the same [`SseLineDecoder`]:
//! - [`drive`] pushes each frame into a callback on the calling task
//! - [`frame_stream`] exposes the frames as a lazy `Stream`
//!
//! Both stop on `data: [DONE]` or end of body, and abort on the first decode,
//! transport or callback failure.

pub mod decode;


pub use decode::{SseLineDecoder, StreamState};

use crate::{BoxStream, CallbackError, Error, Result};
use bytes::Bytes;
use futures::{stream, StreamExt};
use serde_json::Value;
use tracing::debug;

/// Outcome of a streamed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamSummary {
    /// Frames delivered to the callback.
    pub frames: usize,
    /// `true` when the stream ended on `data: [DONE]`, `false` on end of body.
    pub terminated_by_sentinel: bool,
}

/// Read `body` to completion, invoking `on_frame` once per decoded frame.
pub async fn drive<F>(mut body: BoxStream<'_, Bytes>, on_frame: &mut F) -> Result<StreamSummary>
where
    F: FnMut(Value) -> std::result::Result<(), CallbackError> + ?Sized,
{
    let mut decoder = SseLineDecoder::new();
    let mut frames = 0usize;

    loop {
        while let Some(frame) = decoder.next_frame()? {
            frames += 1;
            if let Err(e) = on_frame(frame) {
                decoder.fail();
                return Err(Error::Callback(e));
            }
        }

        if decoder.state() != StreamState::Reading {
            break;
        }

        match body.next().await {
            Some(Ok(chunk)) => decoder.feed(&chunk),
            Some(Err(e)) => {
                decoder.fail();
                return Err(e);
            }
            None => decoder.finish(),
        }
    }

    debug!(
        frames,
        sentinel = decoder.terminated_by_sentinel(),
        "event stream closed"
    );

    Ok(StreamSummary {
        frames,
        terminated_by_sentinel: decoder.terminated_by_sentinel(),
    })
}

/// Lazily decode `body` into frames. The stream ends after the first error.
pub fn frame_stream(body: BoxStream<'static, Bytes>) -> BoxStream<'static, Value> {
    let stream = stream::unfold(
        (body, SseLineDecoder::new()),
        |(mut body, mut decoder)| async move {
            loop {
                match decoder.next_frame() {
                    Ok(Some(frame)) => return Some((Ok(frame), (body, decoder))),
                    Err(e) => return Some((Err(e), (body, decoder))),
                    Ok(None) => {}
                }

                if decoder.state() != StreamState::Reading {
                    return None;
                }

                match body.next().await {
                    Some(Ok(chunk)) => decoder.feed(&chunk),
                    Some(Err(e)) => {
                        decoder.fail();
                        return Some((Err(e), (body, decoder)));
                    }
                    None => decoder.finish(),
                }
            }
        },
    );

    Box::pin(stream)
}
