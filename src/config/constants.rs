use std::env;

use crate::models::Subject;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_DOUBT_SOLVER_FUNCTION: &str = "ai-doubt-solver";

pub fn default_subject() -> Subject {
    env::var("DEFAULT_SUBJECT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

pub fn max_content_chars() -> usize {
    env::var("MAX_CONTENT_CHARS")
        .unwrap_or_else(|_| "10000".to_string())
        .parse()
        .unwrap_or(10_000)
}

pub fn max_history_messages() -> usize {
    env::var("MAX_HISTORY_MESSAGES")
        .unwrap_or_else(|_| "50".to_string())
        .parse()
        .unwrap_or(50)
}
