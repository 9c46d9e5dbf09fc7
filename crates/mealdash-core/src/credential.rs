//! Bearer credential storage trait.
//!
//! The remote client keeps its token here so a restored session can keep
//! talking to the backend after a restart. The token is never part of the
//! persisted snapshot.

use async_trait::async_trait;

use crate::error::Result;

/// Durable home of the bearer credential.
///
/// Implementations must not log the token or put it in error messages.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads the stored token. `Ok(None)` means none is stored.
    async fn load(&self) -> Result<Option<String>>;

    /// Stores `token`, or with `None` removes whatever is stored.
    async fn save(&self, token: Option<&str>) -> Result<()>;
}
