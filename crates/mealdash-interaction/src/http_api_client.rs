//! HttpApiClient - reqwest implementation of [`RemoteApi`].
//!
//! Owns the bearer credential: a successful login stores the returned token
//! and every later request carries it as `Authorization: Bearer`. With a
//! [`CredentialStore`] attached the token also survives restarts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mealdash_core::catalog::{Area, Customer, CustomerCategory, Item, Plan};
use mealdash_core::config::ApiConfig;
use mealdash_core::credential::CredentialStore;
use mealdash_core::dashboard::DashboardStatsUpdate;
use mealdash_core::error::{DashboardError, Result};
use mealdash_core::remote::{AuthResponse, RemoteApi};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const LOGIN_PATH: &str = "auth/login";
const DASHBOARD_STATS_PATH: &str = "dashboard/stats";
const PLANS_HEADER_PATH: &str = "plans/header";
const ITEMS_PATH: &str = "items";
const CUSTOMERS_PATH: &str = "customers";
const CUSTOMER_CATEGORY_PATH: &str = "customers/category";
const AREAS_PATH: &str = "areas";

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the meal-plan backend.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    credential: Arc<RwLock<Option<String>>>,
    credential_store: Option<Arc<dyn CredentialStore>>,
}

impl HttpApiClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: Arc::new(RwLock::new(None)),
            credential_store: None,
        })
    }

    /// Persists every credential change through `store`.
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Loads a previously stored token into memory.
    ///
    /// Returns whether a token was found. Without a store this is a no-op.
    pub async fn restore_credential(&self) -> Result<bool> {
        let Some(store) = &self.credential_store else {
            return Ok(false);
        };

        let token = store.load().await?;
        let found = token.is_some();
        *self.credential.write().await = token;
        if found {
            info!("Restored stored credential");
        }
        Ok(found)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True while a bearer credential is held.
    pub async fn has_credential(&self) -> bool {
        self.credential.read().await.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credential.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let request = self.authorize(self.client.get(&url)).await;
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(DashboardError::status(status.as_u16(), truncate(&body)));
        }

        let body = response.text().await.map_err(transport_error)?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| DashboardError::decode(format!("{path}: {e}")))?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl RemoteApi for HttpApiClient {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<AuthResponse> {
        let url = self.endpoint(LOGIN_PATH);
        debug!(%url, identifier, "POST login");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: identifier,
                password: secret,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            // The backend said no; keep whatever explanation it gave
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            debug!(status = status.as_u16(), "login rejected");
            return Ok(AuthResponse::rejected(message));
        }

        let mut auth: AuthResponse = serde_json::from_str(&body)
            .map_err(|e| DashboardError::decode(format!("{LOGIN_PATH}: {e}")))?;
        if auth.token.is_some() {
            auth.success = true;
        }

        if auth.success {
            match auth.token.clone() {
                Some(token) => self.set_credential(Some(token)).await,
                None => warn!("login succeeded without a token"),
            }
        }

        Ok(auth)
    }

    async fn set_credential(&self, token: Option<String>) {
        if let Some(store) = &self.credential_store
            && let Err(e) = store.save(token.as_deref()).await
        {
            warn!(error = %e, "Failed to persist credential, keeping it in memory only");
        }
        *self.credential.write().await = token;
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStatsUpdate> {
        self.get_json(DASHBOARD_STATS_PATH).await
    }

    async fn get_all_plans_header(&self) -> Result<Vec<Plan>> {
        self.get_json(PLANS_HEADER_PATH).await
    }

    async fn get_all_items(&self) -> Result<Vec<Item>> {
        self.get_json(ITEMS_PATH).await
    }

    async fn get_all_customers(&self) -> Result<Vec<Customer>> {
        self.get_json(CUSTOMERS_PATH).await
    }

    async fn get_customers_category(&self) -> Result<Vec<CustomerCategory>> {
        self.get_json(CUSTOMER_CATEGORY_PATH).await
    }

    async fn get_areas(&self) -> Result<Vec<Area>> {
        self.get_json(AREAS_PATH).await
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Payloads arrive either bare or wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

fn transport_error(err: reqwest::Error) -> DashboardError {
    DashboardError::transport(err.to_string())
}

async fn read_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string())
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
