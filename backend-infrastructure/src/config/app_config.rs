use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_application::ops::FailurePolicy;

use crate::config::validation::{parse_bool_flag, validate_failure_policy, validate_log_filter};
use crate::utils::{normalize_optional_text, resolve_path};

pub const CONFIG_ENV: &str = "TRIVIA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub custom_achievements_path: String,
    pub log_filter: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub listener_failure_policy: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            custom_achievements_path: "./custom_achievements.yaml".to_string(),
            log_filter: "info".to_string(),
            log_json: false,
            log_dir: None,
            listener_failure_policy: FailurePolicy::Isolate.as_str().to_string(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> String {
        env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        Self::load_with(path, |key| env::var(key).ok()).await
    }

    /// Reads `path` (defaults when missing), validates it, then layers the
    /// `TRIVIA_*` overrides returned by `lookup` on top.
    pub async fn load_with<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::parse(&content, base_dir)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default().finish(base_dir)?
        };
        config.with_overrides(lookup, base_dir)
    }

    pub fn parse(content: &str, base_dir: Option<&Path>) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))?;
        config.finish(base_dir)
    }

    fn finish(mut self, base_dir: Option<&Path>) -> Result<Self> {
        self.resolve_paths(base_dir);
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    pub fn normalize(&mut self) {
        self.log_dir = normalize_optional_text(self.log_dir.take());
        self.log_filter = self.log_filter.trim().to_string();
        self.listener_failure_policy = self.listener_failure_policy.trim().to_lowercase();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.custom_achievements_path = resolve_path(base, &self.custom_achievements_path);
        if let Some(dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_failure_policy(&self.listener_failure_policy)?;
        validate_log_filter(&self.log_filter)?;
        if self.custom_achievements_path.trim().is_empty() {
            return Err(anyhow!("custom_achievements_path must not be empty"));
        }
        Ok(())
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::parse(&self.listener_failure_policy).unwrap_or_default()
    }

    /// Applies `TRIVIA_*` overrides. Override paths resolve against
    /// `base_dir` like the file's own paths.
    pub fn with_overrides<F>(mut self, lookup: F, base_dir: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |value: &str| match base_dir {
            Some(base) => resolve_path(base, value),
            None => value.trim().to_string(),
        };
        if let Some(value) = lookup("TRIVIA_CUSTOM_ACHIEVEMENTS_PATH") {
            self.custom_achievements_path = resolve(&value);
        }
        if let Some(value) = lookup("TRIVIA_LOG_FILTER") {
            self.log_filter = value;
        }
        if let Some(value) = lookup("TRIVIA_LOG_JSON") {
            self.log_json = parse_bool_flag("TRIVIA_LOG_JSON", &value)?;
        }
        if let Some(value) = lookup("TRIVIA_LOG_DIR") {
            self.log_dir = Some(resolve(&value));
        }
        if let Some(value) = lookup("TRIVIA_LISTENER_FAILURE_POLICY") {
            self.listener_failure_policy = value;
        }
        self.normalize();
        self.validate()?;
        Ok(self)
    }
}
