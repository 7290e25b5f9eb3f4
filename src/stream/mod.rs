//! Incremental decoding of `text/event-stream` chat completion bodies.
//!
//! [`SseDecoder`] is the synchronous line-buffer state machine; [`decode_stream`]
//! drives it from an async byte stream and yields text deltas lazily, one
//! chunk read at a time.

pub mod decoder;
pub mod utf8;

pub use decoder::{DecoderState, LineOutcome, SseDecoder, parse_line};
pub use utf8::Utf8ChunkDecoder;

use async_stream::stream;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::errors::ChatError;

/// Lazy, finite sequence of text deltas for one exchange.
pub type DeltaStream = BoxStream<'static, Result<String, ChatError>>;

/// Adapt a stream of body chunks into a stream of text deltas.
///
/// Reading stops as soon as the `[DONE]` sentinel is decoded. A transport
/// error is yielded once and ends the stream.
pub fn decode_stream<S, B, E>(bytes: S) -> DeltaStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ChatError> + Send + 'static,
{
    Box::pin(stream! {
        let mut decoder = SseDecoder::new();
        let mut bytes = Box::pin(bytes);
        let mut chunks = 0usize;

        while let Some(chunk) = bytes.next().await {
            match chunk {
                Ok(chunk) => {
                    chunks += 1;
                    for delta in decoder.push(chunk.as_ref()) {
                        yield Ok(delta);
                    }
                    if decoder.is_done() {
                        debug!(chunks, "Stream finished with sentinel");
                        return;
                    }
                }
                Err(e) => {
                    let err: ChatError = e.into();
                    warn!(chunks, error = %err, "Stream interrupted");
                    yield Err(err);
                    return;
                }
            }
        }

        for delta in decoder.finish() {
            yield Ok(delta);
        }
        debug!(chunks, "Stream closed by peer");
    })
}

/// Drain a delta stream into one string, calling `on_delta` with every
/// fragment before the next one is requested.
pub async fn collect_deltas<F>(
    mut deltas: DeltaStream,
    mut on_delta: F,
) -> Result<String, ChatError>
where
    F: FnMut(&str),
{
    let mut accumulated = String::new();
    while let Some(delta) = deltas.next().await {
        let delta = delta?;
        accumulated.push_str(&delta);
        on_delta(&delta);
    }
    Ok(accumulated)
}
