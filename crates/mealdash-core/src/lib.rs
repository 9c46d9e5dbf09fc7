//! Domain layer of the mealdash client.
//!
//! Models, the error taxonomy and the collaborator traits the store is
//! built against. Nothing here performs I/O.

pub mod catalog;
pub mod config;
pub mod credential;
pub mod dashboard;
pub mod error;
pub mod remote;
pub mod session;
pub mod snapshot;
pub mod theme;

mod serde_ids;

// Re-export common error types
pub use error::{DashboardError, LoginError, Result};
