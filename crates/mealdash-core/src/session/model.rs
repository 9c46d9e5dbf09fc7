//! Session domain models.

use serde::{Deserialize, Serialize};

use crate::remote::RemoteUser;
use crate::serde_ids::string_id;

/// Display name used when the backend does not send one.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Avatar used when the backend does not send one.
pub const DEFAULT_AVATAR_URL: &str = "/avatars/default.png";

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl UserProfile {
    /// Builds a profile from a login response, filling every gap the backend
    /// left open.
    ///
    /// `identifier` is what the user typed at the login prompt. It stands in
    /// for the id when the backend sends no user at all, and for the email
    /// when it looks like one.
    pub fn from_remote(remote: Option<RemoteUser>, identifier: &str) -> Self {
        let remote = remote.unwrap_or_default();
        let fallback_email = if identifier.contains('@') {
            identifier.to_string()
        } else {
            String::new()
        };

        Self {
            id: non_blank(remote.id).unwrap_or_else(|| identifier.to_string()),
            name: non_blank(remote.name).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            email: non_blank(remote.email).unwrap_or(fallback_email),
            avatar_url: non_blank(remote.avatar_url)
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Coarse session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Authentication state of the current process.
///
/// Holds the user alone and derives `is_authenticated` from it, so an
/// authenticated session without a user cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_by_default() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_authenticated_has_user() {
        let session = Session::authenticated(UserProfile::from_remote(None, "admin"));
        assert!(session.is_authenticated());
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("admin"));
    }

    #[test]
    fn test_from_remote_fills_defaults() {
        let remote = RemoteUser {
            id: Some("1".into()),
            name: Some("Admin User".into()),
            email: None,
            avatar_url: None,
        };
        let user = UserProfile::from_remote(Some(remote), "admin");
        assert_eq!(user.id, "1");
        assert_eq!(user.name, "Admin User");
        assert_eq!(user.email, "");
        assert_eq!(user.avatar_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_from_remote_without_user() {
        let user = UserProfile::from_remote(None, "ops@example.com");
        assert_eq!(user.id, "ops@example.com");
        assert_eq!(user.name, DEFAULT_DISPLAY_NAME);
        assert_eq!(user.email, "ops@example.com");
    }

    #[test]
    fn test_blank_name_is_replaced() {
        let remote = RemoteUser {
            name: Some("   ".into()),
            ..RemoteUser::default()
        };
        let user = UserProfile::from_remote(Some(remote), "admin");
        assert_eq!(user.name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_profile_accepts_numeric_id() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id": 1, "name": "Admin User", "avatarUrl": "/a.png"}"#)
                .unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let user = UserProfile::from_remote(None, "admin");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatarUrl").is_some());
        assert!(json.get("avatar_url").is_none());
    }
}
