use super::models::Config;

pub fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let expanded = expand_env_vars(&contents)?;
    let config: Config = serde_yaml::from_str(&expanded)?;
    Ok(config)
}

/// Replace every `${NAME}` with the value of the environment variable `NAME`.
pub fn expand_env_vars(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| format!("Unterminated variable reference near '{}'", &rest[start..]))?;
        let name = &after[..end];
        let value = std::env::var(name)
            .map_err(|_| format!("Environment variable '{name}' referenced in config is not set"))?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
