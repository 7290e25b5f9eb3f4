use serde_json::Value;
use tracing::debug;

use super::utf8::Utf8ChunkDecoder;

pub const DATA_PREFIX: &str = "data: ";
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Streaming,
    Done,
}

/// What a single line of the event stream amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Comment, keep-alive, blank line or a non-`data` field.
    Skip,
    /// The `[DONE]` sentinel.
    Done,
    /// A JSON frame carrying a non-empty text delta.
    Delta(String),
    /// A JSON frame without `choices[0].delta.content` (or with an empty one).
    NoContent,
    /// A `data:` payload that is not valid JSON (yet).
    Unparseable,
}

/// Classify one line, with or without its trailing `\r`.
pub fn parse_line(raw: &str) -> LineOutcome {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    if line.is_empty() || line.starts_with(':') {
        return LineOutcome::Skip;
    }
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return LineOutcome::Skip;
    };

    let payload = payload.trim();
    if payload == DONE_SENTINEL {
        return LineOutcome::Done;
    }

    match parse_frame(payload) {
        Some(frame) => match extract_content(&frame) {
            Some(content) if !content.is_empty() => LineOutcome::Delta(content.to_string()),
            _ => LineOutcome::NoContent,
        },
        None => LineOutcome::Unparseable,
    }
}

/// Parse a frame payload. Unpaired UTF-16 surrogate escapes (`\ud83c` with no
/// low half) are decoded as U+FFFD, matching the lossy handling of raw bytes.
/// A payload that ends early stays unparseable so the caller can wait for more.
fn parse_frame(payload: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(payload) {
        Ok(frame) => Some(frame),
        Err(e) if e.is_eof() => None,
        Err(_) => {
            let repaired = replace_lone_surrogates(payload)?;
            debug!("Replaced unpaired surrogate escape in frame");
            serde_json::from_str(&repaired).ok()
        }
    }
}

/// Rewrites every unpaired `\uD800`-`\uDFFF` escape to `\ufffd`. Returns `None`
/// when there is nothing to rewrite.
fn replace_lone_surrogates(payload: &str) -> Option<String> {
    let bytes = payload.as_bytes();
    let mut repaired = String::with_capacity(payload.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        match escaped_unit(bytes, i) {
            Some(0xD800..=0xDBFF)
                if matches!(escaped_unit(bytes, i + 6), Some(0xDC00..=0xDFFF)) =>
            {
                i += 12
            }
            Some(0xD800..=0xDFFF) => {
                repaired.push_str(&payload[copied..i]);
                repaired.push_str("\\ufffd");
                i += 6;
                copied = i;
            }
            Some(_) => i += 6,
            // `\\`, `\"` and friends: skip both bytes so an escaped backslash
            // is never read as the start of another escape.
            None => i += 2,
        }
    }
    if copied == 0 {
        return None;
    }
    repaired.push_str(&payload[copied..]);
    Some(repaired)
}

/// The code unit of a `\uXXXX` escape starting at `at`.
fn escaped_unit(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' {
        return None;
    }
    escape[2..].iter().try_fold(0u16, |unit, &b| {
        let digit = (b as char).to_digit(16)?;
        Some(unit << 4 | digit as u16)
    })
}

/// `choices[0].delta.content` of a chat completion chunk.
pub fn extract_content(frame: &Value) -> Option<&str> {
    frame
        .pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
}

/// Incremental decoder for `data: {json}` chat completion streams.
///
/// Bytes go in through [`SseDecoder::push`] in whatever chunks the transport
/// delivers; text deltas come out in arrival order. Once the sentinel is seen
/// or [`SseDecoder::finish`] has run the decoder is done and ignores input.
#[derive(Debug)]
pub struct SseDecoder {
    utf8: Utf8ChunkDecoder,
    buffer: String,
    state: DecoderState,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SseDecoder {
    pub fn new() -> Self {
        Self {
            utf8: Utf8ChunkDecoder::new(),
            buffer: String::new(),
            state: DecoderState::Streaming,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == DecoderState::Done
    }

    /// Bytes received but not yet turned into deltas.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.is_done() {
            return Vec::new();
        }
        let text = self.utf8.decode(chunk);
        self.buffer.push_str(&text);
        self.drain_lines()
    }

    /// End of data: decode whatever is left, including a last line with no
    /// trailing newline. Lines that still do not parse are dropped.
    pub fn finish(&mut self) -> Vec<String> {
        if self.is_done() {
            return Vec::new();
        }
        let tail = self.utf8.finish();
        self.buffer.push_str(&tail);
        let rest = std::mem::take(&mut self.buffer);
        self.state = DecoderState::Done;

        let mut deltas = Vec::new();
        let mut dropped_bytes = 0;
        for line in rest.split('\n') {
            match parse_line(line) {
                LineOutcome::Delta(text) => deltas.push(text),
                LineOutcome::Done => break,
                LineOutcome::Unparseable => dropped_bytes += line.len(),
                LineOutcome::Skip | LineOutcome::NoContent => {}
            }
        }
        if dropped_bytes > 0 {
            debug!(dropped_bytes, "Dropping unparseable frame at end of stream");
        }
        deltas
    }

    fn drain_lines(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let raw: String = self.buffer.drain(..=newline).collect();
            match parse_line(&raw[..newline]) {
                LineOutcome::Delta(text) => deltas.push(text),
                LineOutcome::Skip | LineOutcome::NoContent => {}
                LineOutcome::Done => {
                    self.state = DecoderState::Done;
                    self.buffer.clear();
                    break;
                }
                LineOutcome::Unparseable => {
                    // Frame may have been cut by a chunk boundary; retry once more
                    // bytes have arrived.
                    debug!(line_len = raw.len(), "Re-buffering unparseable frame");
                    self.buffer.insert_str(0, &raw);
                    break;
                }
            }
        }
        deltas
    }
}
