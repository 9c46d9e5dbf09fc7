//! Composition root: builds the one store for this process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use mealdash_application::DashboardStore;
use mealdash_core::config::AppConfig;
use mealdash_core::credential::CredentialStore;
use mealdash_core::snapshot::SnapshotRepository;
use mealdash_core::theme::{ThemeApplier, ThemeMode};
use mealdash_infrastructure::{
    ConfigService, FileCredentialStore, FileSnapshotRepository, InMemoryCredentialStore,
    InMemorySnapshotRepository, MealdashPaths,
};
use mealdash_interaction::HttpApiClient;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Options that affect how the store is wired.
pub struct BootstrapOptions {
    pub config_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub ephemeral: bool,
}

/// A terminal has no document to restyle; the theme change is logged.
struct LoggingThemeApplier;

impl ThemeApplier for LoggingThemeApplier {
    fn apply(&self, mode: ThemeMode) {
        info!(mode = mode.as_str(), "Theme applied");
    }
}

/// Loads configuration and installs the tracing subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. A config load failure
/// is logged once the subscriber is up.
pub fn load_config(options: &BootstrapOptions) -> Result<(MealdashPaths, AppConfig)> {
    let paths = MealdashPaths::new(options.config_dir.clone());
    let service = ConfigService::new(&paths).context("Failed to resolve config location")?;
    let (mut config, load_error) = service.load_config();

    if let Some(url) = &options.api_url {
        config.api.base_url = url.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    fmt().with_env_filter(filter).with_target(false).init();

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    Ok((paths, config))
}

/// Builds and hydrates the store, then re-asserts the theme.
pub async fn bootstrap(options: &BootstrapOptions) -> Result<DashboardStore> {
    let (paths, config) = load_config(options)?;

    let paths = match &config.storage.dir {
        Some(dir) if options.config_dir.is_none() => MealdashPaths::new(Some(dir.clone())),
        _ => paths,
    };

    let repository: Arc<dyn SnapshotRepository>;
    let credentials: Arc<dyn CredentialStore>;
    if options.ephemeral {
        repository = Arc::new(InMemorySnapshotRepository::new());
        credentials = Arc::new(InMemoryCredentialStore::new());
    } else {
        let file_repository =
            FileSnapshotRepository::new(&paths).context("Failed to open snapshot storage")?;
        info!(path = %file_repository.path().display(), "Using snapshot storage");
        repository = Arc::new(file_repository);
        credentials = Arc::new(
            FileCredentialStore::new(&paths).context("Failed to open credential storage")?,
        );
    }

    let api = HttpApiClient::from_config(&config.api)
        .context("Failed to create API client")?
        .with_credential_store(credentials);
    info!(base_url = api.base_url(), "Using backend");
    if let Err(e) = api.restore_credential().await {
        warn!(error = %e, "Stored credential unreadable, continuing without it");
    }

    let store = DashboardStore::new(Arc::new(api), repository, Arc::new(LoggingThemeApplier));
    store.hydrate().await;
    store.initialize_theme().await;

    Ok(store)
}
