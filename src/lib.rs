pub mod client;
pub mod config;
pub mod conversation;
pub mod errors;
pub mod gamification;
pub mod models;
pub mod session;
pub mod stream;

pub use reqwest;
pub use serde;
pub use serde_json;
