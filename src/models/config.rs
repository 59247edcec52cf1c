//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint and HTTP behavior settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing page-size settings
    #[serde(default)]
    pub paging: PagingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.environment.trim().is_empty() {
            return Err(AppError::validation("api.environment is empty"));
        }
        if self.api.environments.is_empty() {
            return Err(AppError::validation("No environments defined"));
        }
        for env in &self.api.environments {
            if env.base_url.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "environment '{}' has an empty base_url",
                    env.name
                )));
            }
            url::Url::parse(&env.base_url).map_err(|e| {
                AppError::validation(format!(
                    "environment '{}' base_url is invalid: {e}",
                    env.name
                ))
            })?;
        }
        if self.api.base_url().is_err() {
            return Err(AppError::validation(format!(
                "api.environment '{}' matches no [[api.environments]] entry",
                self.api.environment
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.paging.per_page == 0 {
            return Err(AppError::validation("paging.per_page must be > 0"));
        }
        if self.paging.per_page > self.paging.max_per_page {
            return Err(AppError::validation(
                "paging.per_page must not exceed paging.max_per_page",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            paging: PagingConfig::default(),
        }
    }
}

/// API endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Name of the active environment
    #[serde(default = "defaults::environment")]
    pub environment: String,

    /// Known environments and their base URLs
    #[serde(default = "defaults::environments")]
    pub environments: Vec<EnvironmentInfo>,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// Base URL of the active environment.
    pub fn base_url(&self) -> Result<&str> {
        self.environments
            .iter()
            .find(|env| env.name == self.environment)
            .map(|env| env.base_url.as_str())
            .ok_or_else(|| {
                AppError::config(format!("Unknown environment '{}'", self.environment))
            })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: defaults::environment(),
            environments: defaults::environments(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// A named API environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    /// Environment name (e.g. "production")
    pub name: String,

    /// API base URL for this environment
    pub base_url: String,
}

/// Listing page-size settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Default page size for listings
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// Upper bound accepted for --per-page style overrides
    #[serde(default = "defaults::max_per_page")]
    pub max_per_page: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            per_page: defaults::per_page(),
            max_per_page: defaults::max_per_page(),
        }
    }
}

mod defaults {
    use super::EnvironmentInfo;

    // API defaults
    pub fn environment() -> String {
        "production".into()
    }
    pub fn environments() -> Vec<EnvironmentInfo> {
        vec![
            EnvironmentInfo {
                name: "production".to_string(),
                base_url: "https://api.studyshelf.app/v1/".to_string(),
            },
            EnvironmentInfo {
                name: "staging".to_string(),
                base_url: "https://staging.api.studyshelf.app/v1/".to_string(),
            },
            EnvironmentInfo {
                name: "local".to_string(),
                base_url: "http://localhost:4000/v1/".to_string(),
            },
        ]
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; studyshelf/0.1)".into()
    }

    // Paging defaults
    pub fn per_page() -> u32 {
        20
    }
    pub fn max_per_page() -> u32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_environment() {
        let mut config = Config::default();
        config.api.environment = "qa".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.environments[0].base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_page() {
        let mut config = Config::default();
        config.paging.per_page = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_follows_active_environment() {
        let mut config = Config::default();
        config.api.environment = "local".to_string();
        assert_eq!(config.api.base_url().unwrap(), "http://localhost:4000/v1/");
    }
}
