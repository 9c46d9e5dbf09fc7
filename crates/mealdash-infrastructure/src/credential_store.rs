//! Credential store implementations.
//!
//! The token lives in its own file next to the snapshot so that the
//! snapshot keeps its fixed three-key shape.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use mealdash_core::credential::CredentialStore;
use mealdash_core::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::paths::MealdashPaths;
use crate::storage::AtomicJsonFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
}

/// Stores the bearer token as `credential.json`, readable only by the
/// owner on unix.
#[derive(Clone)]
pub struct FileCredentialStore {
    file: Arc<AtomicJsonFile<StoredCredential>>,
}

impl FileCredentialStore {
    pub fn new(paths: &MealdashPaths) -> Result<Self> {
        let path = paths
            .credential_file()
            .map_err(|e| DashboardError::config(e.to_string()))?;
        Ok(Self::at_path(path))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        let file = self.file.clone();
        let stored = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| DashboardError::internal(format!("Failed to join task: {}", e)))??;
        Ok(stored
            .map(|stored| stored.token)
            .filter(|token| !token.is_empty()))
    }

    async fn save(&self, token: Option<&str>) -> Result<()> {
        let file = self.file.clone();
        let token = token.map(str::to_string);
        tokio::task::spawn_blocking(move || -> Result<()> {
            match token {
                Some(token) => {
                    file.save(&StoredCredential { token })?;
                    restrict_to_owner(file.path())?;
                }
                None => file.remove()?,
            }
            Ok(())
        })
        .await
        .map_err(|e| DashboardError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

/// Volatile credential store for ephemeral runs and tests.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    token: Arc<Mutex<Option<String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: Option<&str>) -> Result<()> {
        *self.token.lock().await = token.map(str::to_string);
        Ok(())
    }
}
