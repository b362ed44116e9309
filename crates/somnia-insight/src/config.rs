//! Engine configuration

use crate::cache::StalenessPolicy;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Primary environment variable holding the generator API key
pub const API_KEY_ENV: &str = "SOMNIA_API_KEY";

/// Checked when [`API_KEY_ENV`] is unset
pub const FALLBACK_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Generator credential. Never serialized or printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(key.trim().to_string()))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        [API_KEY_ENV, FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find_map(|value| Self::new(value).ok())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of an OpenAI-compatible API, without `/chat/completions`
    pub base_url: String,
    pub model: String,
    /// 0.0-1.0
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub staleness: StalenessPolicy,
}

impl EngineConfig {
    /// Load from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.generator.temperature) {
            tracing::warn!(
                temperature = self.generator.temperature,
                "generator temperature out of range, clamping"
            );
            self.generator.temperature = if self.generator.temperature.is_nan() {
                GeneratorConfig::default().temperature
            } else {
                self.generator.temperature.clamp(0.0, 1.0)
            };
        }
        if self.staleness.min_records == 0 {
            tracing::warn!("staleness.min_records must be at least 1");
            self.staleness.min_records = 1;
        }
        if self.staleness.min_new_records == 0 {
            tracing::warn!("staleness.min_new_records must be at least 1");
            self.staleness.min_new_records = 1;
        }
        self
    }
}
