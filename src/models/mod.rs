pub mod chat;
pub mod streaming;
pub mod subject;

pub use chat::{ChatMessage, DoubtRequest, Role};
pub use streaming::ChatCompletionChunk;
pub use subject::Subject;
