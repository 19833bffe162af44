//! Configuration management for arcteller
//!
//! Settings are read from an optional YAML file. The backend base URL can be
//! overridden from the environment so the same binary can point at different
//! gateways without editing files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub use error::ConfigError;
use error::ConfigResult;

/// Environment variable that overrides `backend.base_url`
pub const BASE_URL_ENV: &str = "ARCTELLER_API_BASE_URL";

// ==================== Configuration Types ====================

/// Backend gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Gateway base URL; empty means "use `origin`"
    #[serde(default)]
    pub base_url: String,
    /// Origin used when no base URL is configured
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Per-call deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            origin: default_origin(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend gateway settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// The environment override is applied before validation.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError {
            path: path.display().to_string(),
        })?;

        let config = Self::from_yaml(&content)?
            .with_base_url_override(std::env::var(BASE_URL_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load the file when it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { path }) => {
                log::debug!("Config file {} not found, using defaults", path);
                let config = Self::default().with_base_url_override(std::env::var(BASE_URL_ENV).ok());
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document is a valid "all defaults" file
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Replace the base URL when an override value is present and non-empty
    pub fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.backend.base_url = url;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if !self.backend.base_url.is_empty() && !is_http_url(&self.backend.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if !is_http_url(&self.backend.origin) {
            return Err(ConfigError::InvalidValue {
                field: "backend.origin".to_string(),
                reason: "Origin must start with http:// or https://".to_string(),
            });
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Base URL every request path is appended to
    pub fn effective_base_url(&self) -> &str {
        let base = if self.backend.base_url.is_empty() {
            &self.backend.origin
        } else {
            &self.backend.base_url
        };
        base.trim_end_matches('/')
    }

    /// Per-call deadline
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
