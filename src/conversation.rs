use futures::StreamExt;
use tracing::{info, warn};

use crate::client::ChatBackend;
use crate::errors::ChatError;
use crate::models::{ChatMessage, DoubtRequest, Role, Subject};
use crate::session::SessionContext;

/// One doubt-solver chat: the message list and the assistant answer that is
/// being streamed into it.
///
/// `send` borrows the conversation mutably for the whole exchange, so a second
/// question cannot start while an answer is still streaming.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    subject: Subject,
    messages: Vec<ChatMessage>,
}

/// Rolls the message list back to where the exchange started unless the
/// exchange completed. Covers errors and futures dropped mid-stream.
struct PendingExchange<'a> {
    messages: &'a mut Vec<ChatMessage>,
    start_len: usize,
    committed: bool,
}

impl PendingExchange<'_> {
    fn commit(mut self) -> ChatMessage {
        self.committed = true;
        match self.messages.last() {
            Some(m) if m.role == Role::Assistant => m.clone(),
            _ => ChatMessage::assistant(String::new()),
        }
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.messages.truncate(self.start_len);
        }
    }
}

impl Conversation {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            messages: Vec::new(),
        }
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn set_subject(&mut self, subject: Subject) {
        self.subject = subject;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Start a new chat.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Reopen a previously answered doubt.
    pub fn load(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        subject: Subject,
    ) {
        self.messages = vec![ChatMessage::user(question), ChatMessage::assistant(answer)];
        self.subject = subject;
    }

    /// Ask `question`, streaming the answer into the last message.
    ///
    /// `on_delta` sees the accumulated answer after every fragment. If the
    /// request fails, the stream breaks, or the future is dropped before the
    /// answer completes, the conversation is left as it was before the call.
    pub async fn send<F>(
        &mut self,
        backend: &dyn ChatBackend,
        ctx: &SessionContext,
        question: &str,
        mut on_delta: F,
    ) -> Result<ChatMessage, ChatError>
    where
        F: FnMut(&str),
    {
        if question.trim().is_empty() {
            return Err(ChatError::InvalidRequest("Question is empty".to_string()));
        }

        let request =
            DoubtRequest::new(question, self.subject).with_history(self.messages.clone());
        let start_len = self.messages.len();
        let mut pending = PendingExchange {
            messages: &mut self.messages,
            start_len,
            committed: false,
        };

        pending.messages.push(ChatMessage::user(question));
        let mut deltas = match backend.stream_answer(ctx, &request).await {
            Ok(deltas) => deltas,
            Err(e) => {
                warn!(error = %e, "Doubt solver request failed");
                return Err(e);
            }
        };

        pending.messages.push(ChatMessage::assistant(String::new()));
        let mut fragments = 0usize;
        while let Some(delta) = deltas.next().await {
            match delta {
                Ok(delta) => {
                    fragments += 1;
                    if let Some(answer) = pending.messages.last_mut() {
                        answer.content.push_str(&delta);
                        on_delta(&answer.content);
                    }
                }
                Err(e) => {
                    warn!(error = %e, fragments, "Answer stream broke, dropping partial answer");
                    return Err(e);
                }
            }
        }

        let answer = pending.commit();
        info!(fragments, answer_len = answer.content.len(), "Answer complete");
        Ok(answer)
    }
}
