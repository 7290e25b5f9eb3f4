use futures::stream;
use tutor_lib::errors::ChatError;
use tutor_lib::stream::{collect_deltas, decode_stream};

use super::helpers::*;

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_frame_split_across_chunks() {
    let chunks = vec![
        b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel".to_vec(),
        b"lo\"}}]}\n".to_vec(),
        b"data: [DONE]\n".to_vec(),
    ];
    assert_eq!(collect_all(byte_stream(chunks)).await, vec!["Hello"]);
}

#[tokio::test]
async fn test_sentinel_only() {
    let chunks = vec![b"data: [DONE]\n".to_vec()];
    assert!(collect_all(byte_stream(chunks)).await.is_empty());
}

#[tokio::test]
async fn test_keep_alive_and_blank_line_skipped() {
    let chunks =
        vec![b": keep-alive\n\ndata: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n".to_vec()];
    assert_eq!(collect_all(byte_stream(chunks)).await, vec!["Hi"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_frames_in_order_and_nothing_after_done() {
    let mut body = sse_body(&["Photo", "synthesis ", "", "uses light."]);
    body.push_str(&frame("ignored"));
    let deltas = collect_all(byte_stream(vec![body.into_bytes()])).await;
    assert_eq!(deltas, vec!["Photo", "synthesis ", "uses light."]);
}

#[tokio::test]
async fn test_chunk_boundary_invariance() {
    let body = format!(
        ": ping\r\n{}event: message\nid: 7\n{}",
        frame("Größe ✓ "),
        sse_body(&["日本語", " and emoji 🎓", "\"quoted\"\n"])
    )
    .replace('\n', "\r\n");
    let bytes = body.as_bytes();
    let expected = collect_all(byte_stream(vec![bytes.to_vec()])).await.concat();
    assert_eq!(expected, "Größe ✓ 日本語 and emoji 🎓\"quoted\"\n");

    for size in 1..=bytes.len() {
        let got = collect_all(byte_stream(chunks_of(bytes, size))).await.concat();
        assert_eq!(got, expected, "chunk size {size}");
    }
    for split in 0..=bytes.len() {
        let chunks = vec![bytes[..split].to_vec(), bytes[split..].to_vec()];
        let got = collect_all(byte_stream(chunks)).await.concat();
        assert_eq!(got, expected, "split at {split}");
    }
}

#[tokio::test]
async fn test_comment_lines_never_produce_output() {
    let body = format!(
        ":data: {}\n: {}\n",
        r#"{"choices":[{"delta":{"content":"no"}}]}"#,
        frame("no").trim_end()
    );
    assert!(collect_all(byte_stream(vec![body.into_bytes()])).await.is_empty());
}

#[tokio::test]
async fn test_frame_without_content_path_does_not_terminate() {
    let body = format!(
        "data: {}\ndata: {}\n{}",
        r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
        r#"{"usage":{"total_tokens":3}}"#,
        sse_body(&["after"])
    );
    let deltas = collect_all(byte_stream(vec![body.into_bytes()])).await;
    assert_eq!(deltas, vec!["after"]);
}

#[tokio::test]
async fn test_flush_on_close_without_trailing_newline() {
    let body = format!("{}{}", frame("first "), frame("last").trim_end());
    let deltas = collect_all(byte_stream(chunks_of(body.as_bytes(), 5))).await;
    assert_eq!(deltas, vec!["first ", "last"]);
}

#[tokio::test]
async fn test_truncated_tail_silently_dropped() {
    let body = format!(
        "{}{}data: {{\"choices\":[{{\"delta\":{{\"content\":\"cut",
        frame("one"),
        frame("two")
    );
    let deltas = collect_all(byte_stream(vec![body.into_bytes()])).await;
    assert_eq!(deltas, vec!["one", "two"]);
}

#[tokio::test]
async fn test_no_reads_after_sentinel() {
    let items = vec![
        Ok(sse_body(&["done"]).into_bytes()),
        Err(ChatError::Transport("should never be read".to_string())),
    ];
    let deltas = collect_all(decode_stream(stream::iter(items))).await;
    assert_eq!(deltas, vec!["done"]);
}

#[tokio::test]
async fn test_transport_error_ends_stream() {
    let items = vec![
        Ok(frame("partial").into_bytes()),
        Err(ChatError::Transport("connection reset".to_string())),
        Ok(frame("unreachable").into_bytes()),
    ];
    let result = collect_deltas(decode_stream(stream::iter(items)), |_| {}).await;
    assert!(matches!(result, Err(ChatError::Transport(msg)) if msg == "connection reset"));
}

#[tokio::test]
async fn test_collect_deltas_calls_back_per_fragment() {
    let mut seen = Vec::new();
    let text = collect_deltas(
        byte_stream(vec![sse_body(&["a", "b", "c"]).into_bytes()]),
        |delta| seen.push(delta.to_string()),
    )
    .await
    .unwrap();
    assert_eq!(text, "abc");
    assert_eq!(seen, vec!["a", "b", "c"]);
}
