//! Main application configuration
//!
//! Loads the engine parameters for the command-line harness from an optional
//! TOML file, then applies environment variable overrides and validates.

use crate::config::EngineConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub engine: EngineConfig,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "glicko-tr".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// missing keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Override values with any environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        let engine = &mut self.engine;
        override_from_env("GLICKO_MU", &mut engine.mu)?;
        override_from_env("GLICKO_PHI", &mut engine.phi)?;
        override_from_env("GLICKO_SIGMA", &mut engine.sigma)?;
        override_from_env("GLICKO_TAU", &mut engine.tau)?;
        override_from_env("GLICKO_EPSILON", &mut engine.epsilon)?;
        override_from_env("GLICKO_SCORE_CLAMP", &mut engine.expected_score_clamp)?;
        override_from_env("GLICKO_MIN_RATING", &mut engine.min_rating)?;
        override_from_env("GLICKO_MAX_RATING", &mut engine.max_rating)?;
        override_from_env(
            "GLICKO_RETIREMENT_THRESHOLD_GAMES",
            &mut engine.weighting.retirement_threshold_games,
        )?;
        override_from_env(
            "GLICKO_RETIREMENT_MAX_WEIGHT",
            &mut engine.weighting.retirement_max_weight,
        )?;

        Ok(())
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) -> Result<()> {
    if let Ok(value) = env::var(key) {
        *target = value
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", key, value))?;
    }
    Ok(())
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.engine.validate()
}
