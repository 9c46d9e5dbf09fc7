//! Session domain module.
//!
//! # Usage
//!
//! ```ignore
//! use mealdash_core::session::{Session, UserProfile};
//! ```

mod model;

pub use model::{DEFAULT_AVATAR_URL, DEFAULT_DISPLAY_NAME, Session, SessionState, UserProfile};
