use serde_json::Value;
use tracing::debug;

use crate::errors::ChatError;

pub const GENERIC_FAILURE: &str = "Failed to get response";

/// Map a non-2xx response into the error shown to the user.
pub fn parse_error_response(status: u16, body: &str) -> ChatError {
    match status {
        429 => ChatError::RateLimited,
        402 => ChatError::PaymentRequired,
        _ => {
            let message =
                extract_error_message(body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
            debug!(status, message = %message, "Doubt solver request failed");
            ChatError::Http { status, message }
        }
    }
}

/// The `error` field of a JSON error body, if there is one.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
