//! Application layer: the dashboard store and its wiring helpers.

pub mod state;
pub mod store;
pub mod testing;
pub mod theme;

pub use state::StoreState;
pub use store::DashboardStore;
pub use theme::ChannelThemeApplier;
