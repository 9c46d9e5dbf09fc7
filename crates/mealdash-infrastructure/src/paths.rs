//! Path management for mealdash files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mealdash/              # Config directory (platform default)
//! ├── config.toml                  # Application configuration
//! ├── dashboard-storage.json       # Persisted snapshot
//! └── credential.json              # Bearer token of the signed-in user
//! ```
//!
//! `MEALDASH_CONFIG_DIR` replaces the platform directory entirely.

use std::path::PathBuf;

use mealdash_core::snapshot::STORAGE_KEY;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "MEALDASH_CONFIG_DIR";

const APP_DIR_NAME: &str = "mealdash";
const CREDENTIAL_FILE_NAME: &str = "credential.json";

/// Errors that can occur during path resolution.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// No platform config directory could be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

/// Resolves where mealdash keeps its files.
#[derive(Debug, Clone, Default)]
pub struct MealdashPaths {
    base_dir: Option<PathBuf>,
}

impl MealdashPaths {
    /// Creates a resolver. `base_dir` wins over the environment and the
    /// platform default.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the mealdash configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the file holding the persisted snapshot.
    pub fn snapshot_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(format!("{STORAGE_KEY}.json")))
    }

    /// Returns the file holding the bearer credential.
    pub fn credential_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CREDENTIAL_FILE_NAME))
    }
}
