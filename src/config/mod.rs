pub mod constants;
pub mod lib;
pub mod models;
pub mod validation;

pub use lib::{expand_env_vars, load_config};
