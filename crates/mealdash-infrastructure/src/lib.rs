pub mod config_service;
pub mod credential_store;
pub mod paths;
pub mod snapshot_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::credential_store::{FileCredentialStore, InMemoryCredentialStore};
pub use crate::paths::MealdashPaths;
pub use crate::snapshot_repository::{FileSnapshotRepository, InMemorySnapshotRepository};
