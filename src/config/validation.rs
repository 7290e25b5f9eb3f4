use super::models::Config;

/// Validates a loaded Config.
/// Returns Ok(()) if valid, or Err(Vec<String>) with a list of error messages if invalid.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let gateway = &config.gateway;

    let url = &gateway.functions_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "Gateway functions_url '{}' must start with http:// or https://.",
            gateway.functions_url
        ));
    }
    if gateway.publishable_key.trim().is_empty() {
        errors.push("Gateway publishable_key is empty.".to_string());
    }
    if gateway.doubt_solver_function.trim_matches('/').is_empty() {
        errors.push("Gateway doubt_solver_function is empty.".to_string());
    }
    if gateway.request_timeout_secs == Some(0) {
        errors.push("Gateway request_timeout_secs must be greater than zero.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
