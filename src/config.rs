// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for locating and loading the
//! client configuration from the storage directory.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::Config;

/// File name of the client configuration inside the storage directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Path of the configuration file under a storage directory.
pub fn config_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join(CONFIG_FILE)
}

/// Load and validate configuration from the storage directory.
///
/// Falls back to defaults with a warning when the file is absent or
/// malformed; an invalid configuration is still an error.
pub fn load(storage_dir: &Path) -> Result<Config> {
    let config = Config::load_or_default(config_path(storage_dir));
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load(tmp.path()).unwrap();
        assert_eq!(config.api.environment, "production");
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            config_path(tmp.path()),
            r#"
                [api]
                environment = "local"

                [paging]
                per_page = 5
            "#,
        )
        .unwrap();

        let config = load(tmp.path()).unwrap();
        assert_eq!(config.api.environment, "local");
        assert_eq!(config.paging.per_page, 5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            config_path(tmp.path()),
            r#"
                [api]
                timeout_secs = 0
            "#,
        )
        .unwrap();

        assert!(load(tmp.path()).is_err());
    }
}
