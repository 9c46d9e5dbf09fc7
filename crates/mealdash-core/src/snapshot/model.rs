//! Persisted projection of the store.
//!
//! Only the theme flag and the session survive a restart. The dashboard
//! cache and the transient loading/error flags are never written.

use serde::{Deserialize, Serialize};

use crate::session::{Session, UserProfile};
use crate::theme::ThemePreference;

/// Namespace key the snapshot is stored under.
pub const STORAGE_KEY: &str = "dashboard-storage";

/// Durable snapshot: `{ isDarkMode, isAuthenticated, user }`.
///
/// Every field defaults when missing, and unknown fields are ignored, so
/// snapshots written by older or newer builds still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub is_dark_mode: bool,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl PersistedSnapshot {
    /// Projects the persisted subset out of live state.
    pub fn capture(theme: &ThemePreference, session: &Session) -> Self {
        Self {
            is_dark_mode: theme.is_dark_mode,
            is_authenticated: session.is_authenticated(),
            user: session.user().cloned(),
        }
    }

    /// True when `isAuthenticated` agrees with the presence of `user`.
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == self.user.is_some()
    }

    /// Splits the snapshot back into live state.
    ///
    /// An inconsistent session (flag without user, or user without flag)
    /// comes back anonymous.
    pub fn into_parts(self) -> (ThemePreference, Session) {
        let theme = ThemePreference {
            is_dark_mode: self.is_dark_mode,
        };
        let session = match self.user {
            Some(user) if self.is_authenticated => Session::authenticated(user),
            _ => Session::anonymous(),
        };
        (theme, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserProfile {
        UserProfile {
            id: "1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
            avatar_url: "/avatars/admin.png".into(),
        }
    }

    #[test]
    fn test_round_trip_through_json() {
        let theme = ThemePreference { is_dark_mode: true };
        let session = Session::authenticated(admin());
        let snapshot = PersistedSnapshot::capture(&theme, &session);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: PersistedSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.into_parts(), (theme, session));
    }

    #[test]
    fn test_wire_shape_has_exactly_three_keys() {
        let snapshot = PersistedSnapshot::capture(&ThemePreference::default(), &Session::anonymous());
        let value = serde_json::to_value(&snapshot).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["isAuthenticated", "isDarkMode", "user"]);
        assert!(object["user"].is_null());
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot: PersistedSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, PersistedSnapshot::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let snapshot: PersistedSnapshot =
            serde_json::from_str(r#"{"isDarkMode": true, "sidebarOpen": false}"#).unwrap();
        assert!(snapshot.is_dark_mode);
    }

    #[test]
    fn test_numeric_user_id_keeps_whole_snapshot() {
        let raw = r#"{
            "isDarkMode": true,
            "isAuthenticated": true,
            "user": {"id": 1, "name": "Admin User", "email": "", "avatarUrl": "/avatars/default.png"}
        }"#;
        let snapshot: PersistedSnapshot = serde_json::from_str(raw).unwrap();

        let (theme, session) = snapshot.into_parts();
        assert!(theme.is_dark_mode);
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("1"));
    }

    #[test]
    fn test_flag_without_user_is_anonymous() {
        let snapshot = PersistedSnapshot {
            is_dark_mode: false,
            is_authenticated: true,
            user: None,
        };
        assert!(!snapshot.is_consistent());
        let (_, session) = snapshot.into_parts();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_user_without_flag_is_anonymous() {
        let snapshot = PersistedSnapshot {
            is_dark_mode: true,
            is_authenticated: false,
            user: Some(admin()),
        };
        let (theme, session) = snapshot.into_parts();
        assert!(theme.is_dark_mode);
        assert!(session.user().is_none());
    }
}
