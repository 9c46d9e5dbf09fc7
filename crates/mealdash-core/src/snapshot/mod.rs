pub mod model;
pub mod repository;

pub use model::{PersistedSnapshot, STORAGE_KEY};
pub use repository::SnapshotRepository;
