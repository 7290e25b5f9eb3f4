use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Rate limits exceeded, please try again later.")]
    RateLimited,

    #[error("Payment required, please add funds.")]
    PaymentRequired,

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ChatError {
    /// Transient failures the user can simply resend after.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChatError::RateLimited
                | ChatError::Http { .. }
                | ChatError::Transport(_)
                | ChatError::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ChatError::Timeout(e.to_string())
        } else {
            ChatError::Transport(e.to_string())
        }
    }
}
