//! Point-in-time view of the store.

use mealdash_core::dashboard::DashboardCache;
use mealdash_core::session::{Session, UserProfile};
use mealdash_core::snapshot::PersistedSnapshot;
use mealdash_core::theme::ThemePreference;

/// Everything the store holds.
///
/// `theme` and `session` are persisted; `dashboard` and the refresh
/// bookkeeping live only for the current process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub theme: ThemePreference,
    pub session: Session,
    pub dashboard: DashboardCache,
    /// Error text of the most recent failed refresh, cleared by the next
    /// successful one.
    pub last_dashboard_error: Option<String>,
    refreshes_in_flight: u32,
}

impl StoreState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.theme.is_dark_mode
    }

    /// True while at least one dashboard refresh is waiting on the backend.
    pub fn is_dashboard_loading(&self) -> bool {
        self.refreshes_in_flight > 0
    }

    /// The persisted subset of this state.
    pub fn persisted(&self) -> PersistedSnapshot {
        PersistedSnapshot::capture(&self.theme, &self.session)
    }

    pub(crate) fn begin_refresh(&mut self) {
        self.refreshes_in_flight += 1;
    }

    pub(crate) fn end_refresh(&mut self) {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = StoreState::default();
        assert!(!state.is_authenticated());
        assert!(!state.is_dark_mode());
        assert!(!state.is_dashboard_loading());
        assert_eq!(state.persisted(), PersistedSnapshot::default());
    }

    #[test]
    fn test_refresh_counter() {
        let mut state = StoreState::default();
        state.begin_refresh();
        state.begin_refresh();
        state.end_refresh();
        assert!(state.is_dashboard_loading());
        state.end_refresh();
        state.end_refresh();
        assert!(!state.is_dashboard_loading());
    }
}
