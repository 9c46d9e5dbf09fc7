//! Snapshot repository implementations.
//!
//! `FileSnapshotRepository` is the durable adapter used by the application;
//! `InMemorySnapshotRepository` backs tests and ephemeral runs.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use mealdash_core::error::{DashboardError, Result};
use mealdash_core::snapshot::{PersistedSnapshot, SnapshotRepository};
use tokio::sync::Mutex;

use crate::paths::MealdashPaths;
use crate::storage::AtomicJsonFile;

/// Stores the snapshot as `dashboard-storage.json`.
///
/// File I/O runs on the blocking pool so store actions never stall the
/// async executor.
#[derive(Clone)]
pub struct FileSnapshotRepository {
    file: Arc<AtomicJsonFile<PersistedSnapshot>>,
}

impl FileSnapshotRepository {
    /// Creates a repository at the default location (see [`MealdashPaths`]).
    pub fn new(paths: &MealdashPaths) -> Result<Self> {
        let path = paths
            .snapshot_file()
            .map_err(|e| DashboardError::config(e.to_string()))?;
        Ok(Self::at_path(path))
    }

    /// Creates a repository for an explicit file path.
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
impl SnapshotRepository for FileSnapshotRepository {
    async fn load(&self) -> Result<Option<PersistedSnapshot>> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.load().map_err(DashboardError::from))
            .await
            .map_err(|e| DashboardError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn save(&self, snapshot: &PersistedSnapshot) -> Result<()> {
        let file = self.file.clone();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || file.save(&snapshot).map_err(DashboardError::from))
            .await
            .map_err(|e| DashboardError::internal(format!("Failed to join task: {}", e)))?
    }
}

/// Volatile repository; its contents die with the process.
#[derive(Clone, Default)]
pub struct InMemorySnapshotRepository {
    snapshot: Arc<Mutex<Option<PersistedSnapshot>>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `snapshot`.
    pub fn with_snapshot(snapshot: PersistedSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    /// Returns what was last saved.
    pub async fn stored(&self) -> Option<PersistedSnapshot> {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn load(&self) -> Result<Option<PersistedSnapshot>> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: &PersistedSnapshot) -> Result<()> {
        *self.snapshot.lock().await = Some(snapshot.clone());
        Ok(())
    }
}
