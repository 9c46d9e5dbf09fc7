//! Configuration service.
//!
//! Loads [`AppConfig`] from `config.toml`, writing the defaults out on first
//! run, then applies environment overrides.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use mealdash_core::config::AppConfig;
use mealdash_core::error::{DashboardError, Result};
use tracing::{info, warn};

use crate::paths::MealdashPaths;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "MEALDASH_API_URL";

/// Loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &MealdashPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| DashboardError::config(e.to_string()))?;
        Ok(Self::at_path(path))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it on first access.
    ///
    /// A broken config file is reported and replaced by defaults for this
    /// run; the file on disk is left alone so it can be fixed.
    pub fn get_config(&self) -> AppConfig {
        let (config, load_error) = self.load_config();
        if let Some(e) = load_error {
            warn!(path = %self.path.display(), error = %e, "Failed to load config, using defaults");
        }
        config
    }

    /// Like [`get_config`](Self::get_config) but hands the load failure to
    /// the caller instead of logging it.
    ///
    /// Used before a tracing subscriber exists. The error is only returned
    /// by the call that actually read the file.
    pub fn load_config(&self) -> (AppConfig, Option<DashboardError>) {
        if let Ok(read_lock) = self.config.read()
            && let Some(cached) = read_lock.as_ref()
        {
            return (cached.clone(), None);
        }

        let (mut loaded, load_error) = match self.load_or_create() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        };
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        (loaded, load_error)
    }

    /// Drops the cached value so the next access re-reads the file.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_or_create(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, toml::to_string_pretty(&config)?)?;
            info!(path = %self.path.display(), "Created default config file");
            return Ok(config);
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Applies environment overrides through `lookup`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealdash_core::config::DEFAULT_API_BASE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::at_path(path.clone());

        let config = service.get_config();

        assert!(path.exists());
        assert_eq!(config.api, AppConfig::default().api);
    }

    #[test]
    fn test_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n[api]\ntimeout_secs = 3\n").unwrap();

        let config = ConfigService::at_path(path).get_config();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api.timeout_secs, 3);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let config = ConfigService::at_path(path.clone()).get_config();
        assert_eq!(config.api.timeout_secs, AppConfig::default().api.timeout_secs);
        assert_eq!(fs::read_to_string(path).unwrap(), "[api\nbase_url = ");
    }

    #[test]
    fn test_load_config_returns_error_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "log_level = ").unwrap();
        let service = ConfigService::at_path(path);

        let (config, load_error) = service.load_config();
        assert_eq!(config.log_level, AppConfig::default().log_level);
        assert!(load_error.unwrap().is_serialization());

        let (_, cached_error) = service.load_config();
        assert!(cached_error.is_none());
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::at_path(path.clone());
        assert_eq!(service.get_config().api.timeout_secs, 15);

        fs::write(&path, "[api]\ntimeout_secs = 30\n").unwrap();
        assert_eq!(service.get_config().api.timeout_secs, 15);

        service.invalidate_cache();
        assert_eq!(service.get_config().api.timeout_secs, 30);
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |_| None);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);

        apply_env_overrides(&mut config, |key| {
            (key == API_URL_ENV).then(|| " https://meals.example.com/api ".to_string())
        });
        assert_eq!(config.api.base_url, "https://meals.example.com/api");
    }
}
