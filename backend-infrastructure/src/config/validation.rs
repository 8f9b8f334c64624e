use anyhow::{anyhow, Result};

use backend_application::ops::FailurePolicy;

pub fn validate_failure_policy(value: &str) -> Result<FailurePolicy> {
    FailurePolicy::parse(value).ok_or_else(|| {
        anyhow!(
            "listener_failure_policy must be 'isolate' or 'propagate', got '{}'",
            value.trim()
        )
    })
}

pub fn parse_bool_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{} must be a boolean, got '{}'", name, other)),
    }
}

pub fn validate_log_filter(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("log_filter must not be empty"));
    }
    Ok(())
}
