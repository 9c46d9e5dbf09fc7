//! Snapshot repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::snapshot::model::PersistedSnapshot;

/// Durable storage for the persisted snapshot.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Reads the stored snapshot. `Ok(None)` means nothing was stored yet.
    async fn load(&self) -> Result<Option<PersistedSnapshot>>;

    /// Replaces the stored snapshot.
    async fn save(&self, snapshot: &PersistedSnapshot) -> Result<()>;
}
