use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_DOUBT_SOLVER_FUNCTION;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub gateway: GatewayConfig,
}

/// Where the serverless functions live and how to call them anonymously.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Base URL of the functions endpoint, e.g. `https://<project>.example.co/functions/v1`.
    pub functions_url: String,
    pub publishable_key: String,
    #[serde(default = "default_doubt_solver_function")]
    pub doubt_solver_function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_doubt_solver_function() -> String {
    DEFAULT_DOUBT_SOLVER_FUNCTION.to_string()
}

impl GatewayConfig {
    pub fn doubt_solver_url(&self) -> String {
        format!(
            "{}/{}",
            self.functions_url.trim_end_matches('/'),
            self.doubt_solver_function.trim_start_matches('/')
        )
    }
}
