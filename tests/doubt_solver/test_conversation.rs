use std::time::Duration;

use tutor_lib::conversation::Conversation;
use tutor_lib::errors::ChatError;
use tutor_lib::models::{ChatMessage, Role, Subject};
use tutor_lib::session::SessionContext;

use super::helpers::*;

#[tokio::test]
async fn test_answer_accumulates_into_last_message() {
    let backend = ScriptedBackend::answering(&["Hello", " world"]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(Subject::Stem);

    let mut renders = Vec::new();
    let answer = conversation
        .send(&backend, &ctx, "Say hello", |text| renders.push(text.to_string()))
        .await
        .unwrap();

    assert_eq!(answer, ChatMessage::assistant("Hello world"));
    assert_eq!(renders, vec!["Hello", "Hello world"]);
    assert_eq!(
        conversation.messages(),
        &[ChatMessage::user("Say hello"), ChatMessage::assistant("Hello world")]
    );
}

#[tokio::test]
async fn test_history_sent_with_follow_up() {
    let backend = ScriptedBackend::new(vec![
        Script::Body(vec![Ok(sse_body(&["A monad is..."]).into_bytes())]),
        Script::Body(vec![Ok(sse_body(&["Like Option."]).into_bytes())]),
    ]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(Subject::ComputerScience);

    conversation.send(&backend, &ctx, "What is a monad?", |_| {}).await.unwrap();
    conversation.send(&backend, &ctx, "Example?", |_| {}).await.unwrap();

    let requests = backend.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].conversation_history.is_empty());
    assert_eq!(requests[1].question, "Example?");
    assert_eq!(requests[1].subject, Subject::ComputerScience);
    assert_eq!(
        requests[1].conversation_history,
        vec![ChatMessage::user("What is a monad?"), ChatMessage::assistant("A monad is...")]
    );
    assert_eq!(conversation.messages().len(), 4);
}

#[tokio::test]
async fn test_request_failure_leaves_conversation_untouched() {
    let backend = ScriptedBackend::new(vec![Script::Fail(ChatError::RateLimited)]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::default();
    conversation.load("Old question", "Old answer", Subject::Humanities);
    let before = conversation.messages().to_vec();

    let mut renders = 0;
    let result = conversation.send(&backend, &ctx, "New question", |_| renders += 1).await;

    assert!(matches!(result, Err(ChatError::RateLimited)));
    assert_eq!(renders, 0);
    assert_eq!(conversation.messages(), before.as_slice());
    assert_eq!(conversation.subject(), Subject::Humanities);
}

#[tokio::test]
async fn test_broken_stream_discards_partial_answer() {
    let backend = ScriptedBackend::new(vec![Script::Body(vec![
        Ok(frame("Half an ").into_bytes()),
        Err(ChatError::Transport("connection reset".to_string())),
    ])]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(Subject::Stem);

    let mut renders = Vec::new();
    let result = conversation
        .send(&backend, &ctx, "Explain", |text| renders.push(text.to_string()))
        .await;

    assert!(matches!(result, Err(ChatError::Transport(_))));
    assert_eq!(renders, vec!["Half an "]);
    assert!(conversation.messages().is_empty());
}

#[tokio::test]
async fn test_abandoned_exchange_rolls_back() {
    let backend = ScriptedBackend::new(vec![Script::Hang(frame("Still thinking").into_bytes())]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(Subject::Stem);

    let mut renders = 0;
    let outcome = tokio::time::timeout(
        Duration::from_millis(100),
        conversation.send(&backend, &ctx, "Long one", |_| renders += 1),
    )
    .await;

    assert!(outcome.is_err(), "exchange should still be streaming");
    assert_eq!(renders, 1);
    assert!(conversation.messages().is_empty());
}

#[tokio::test]
async fn test_empty_answer_still_completes() {
    let backend = ScriptedBackend::answering(&[]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(Subject::Stem);

    let answer = conversation.send(&backend, &ctx, "Anything?", |_| {}).await.unwrap();
    assert_eq!(answer.role, Role::Assistant);
    assert!(answer.content.is_empty());
    assert_eq!(conversation.messages().len(), 2);
}

#[tokio::test]
async fn test_blank_question_rejected_before_backend() {
    let backend = ScriptedBackend::new(vec![]);
    let ctx = SessionContext::anonymous();
    let mut conversation = Conversation::new(Subject::Stem);

    let result = conversation.send(&backend, &ctx, "   ", |_| {}).await;
    assert!(matches!(result, Err(ChatError::InvalidRequest(_))));
    assert!(backend.requests.lock().unwrap().is_empty());

    conversation.load("q", "a", Subject::Stem);
    conversation.reset();
    assert!(conversation.messages().is_empty());
}
