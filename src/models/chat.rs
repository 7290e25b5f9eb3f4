use serde::{Deserialize, Serialize};

use super::subject::Subject;
use crate::config::constants::{max_content_chars, max_history_messages};
use crate::errors::ChatError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a doubt-solver call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoubtRequest {
    pub question: String,
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<ChatMessage>,
}

impl DoubtRequest {
    pub fn new(question: impl Into<String>, subject: Subject) -> Self {
        Self {
            question: question.into(),
            subject,
            conversation_history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.conversation_history = history;
        self
    }

    /// Same limits the doubt-solver function enforces; checked before the
    /// request leaves so the user gets a precise message instead of a 400.
    pub fn validate(&self) -> Result<(), ChatError> {
        let max_chars = max_content_chars();
        let question_chars = self.question.chars().count();
        if question_chars == 0 {
            return Err(ChatError::InvalidRequest("Question is empty".to_string()));
        }
        if question_chars > max_chars {
            return Err(ChatError::InvalidRequest(format!(
                "Question is longer than {max_chars} characters"
            )));
        }

        let max_history = max_history_messages();
        if self.conversation_history.len() > max_history {
            return Err(ChatError::InvalidRequest(format!(
                "Conversation history exceeds {max_history} messages"
            )));
        }
        if let Some(position) = self
            .conversation_history
            .iter()
            .position(|m| m.content.chars().count() > max_chars)
        {
            return Err(ChatError::InvalidRequest(format!(
                "History message {position} is longer than {max_chars} characters"
            )));
        }
        Ok(())
    }
}
