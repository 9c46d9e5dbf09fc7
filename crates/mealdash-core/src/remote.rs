//! Contract of the remote access client.
//!
//! The store talks to the backend only through [`RemoteApi`]. Implementations
//! own the bearer credential; the store merely tells them to set or drop it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::{Area, Customer, CustomerCategory, Item, Plan};
use crate::dashboard::DashboardStatsUpdate;
use crate::error::Result;
use crate::serde_ids::optional_string_id;

/// User record as the backend returns it from the login endpoint.
///
/// Every field is optional; `UserProfile::from_remote` fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    #[serde(default, deserialize_with = "optional_string_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "avatar")]
    pub avatar_url: Option<String>,
}

/// Answer of the authenticate call.
///
/// A rejected login is `Ok` with `success == false`; `Err` is reserved for
/// requests that never got an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn accepted(user: Option<RemoteUser>) -> Self {
        Self {
            success: true,
            user,
            ..Self::default()
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
            ..Self::default()
        }
    }
}

/// Remote access client used by the dashboard store.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Checks the credentials with the backend and, on success, starts
    /// using the returned token for later calls.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<AuthResponse>;

    /// Replaces (or with `None`, clears) the bearer credential.
    async fn set_credential(&self, token: Option<String>);

    async fn get_dashboard_stats(&self) -> Result<DashboardStatsUpdate>;

    async fn get_all_plans_header(&self) -> Result<Vec<Plan>>;

    async fn get_all_items(&self) -> Result<Vec<Item>>;

    async fn get_all_customers(&self) -> Result<Vec<Customer>>;

    async fn get_customers_category(&self) -> Result<Vec<CustomerCategory>>;

    async fn get_areas(&self) -> Result<Vec<Area>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_numeric_user_id() {
        let body = r#"{"success": true, "user": {"id": 1, "name": "Admin User"}}"#;
        let response: AuthResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
        let user = response.user.unwrap();
        assert_eq!(user.id.as_deref(), Some("1"));
        assert_eq!(user.name.as_deref(), Some("Admin User"));
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_auth_response_minimal_rejection() {
        let response: AuthResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.message.is_none());
        assert!(response.user.is_none());
    }

    #[test]
    fn test_access_token_alias() {
        let body = r#"{"success": true, "accessToken": "t-1", "user": {"avatar": "/a.png"}}"#;
        let response: AuthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.token.as_deref(), Some("t-1"));
        assert_eq!(
            response.user.and_then(|u| u.avatar_url).as_deref(),
            Some("/a.png")
        );
    }
}
