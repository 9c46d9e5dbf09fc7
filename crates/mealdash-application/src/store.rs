//! The dashboard store.
//!
//! One `DashboardStore` exists per process. It is built in the composition
//! root, hydrated once, then cloned into every consumer (clones share state).
//!
//! Every public action is a firewall: failures are logged and turned into a
//! fallback value or a [`LoginError`], never propagated as anything else.

use std::future::Future;
use std::sync::Arc;

use mealdash_core::catalog::{Area, Customer, CustomerCategory, Item, Plan};
use mealdash_core::dashboard::DashboardCache;
use mealdash_core::error::{LoginError, Result};
use mealdash_core::remote::RemoteApi;
use mealdash_core::session::{Session, UserProfile};
use mealdash_core::snapshot::{PersistedSnapshot, SnapshotRepository};
use mealdash_core::theme::ThemeApplier;
use tokio::runtime::Handle;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::StoreState;

/// Message returned when `login` is called with a blank identifier or secret.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Username and password are required";

/// Shared session, theme and dashboard state.
#[derive(Clone)]
pub struct DashboardStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    api: Arc<dyn RemoteApi>,
    repository: Arc<dyn SnapshotRepository>,
    theme_applier: Arc<dyn ThemeApplier>,
    state: Mutex<StoreState>,
    updates: watch::Sender<StoreState>,
}

impl DashboardStore {
    /// Creates a store holding compiled-in defaults. Call [`hydrate`] before
    /// handing it to consumers.
    ///
    /// [`hydrate`]: DashboardStore::hydrate
    pub fn new(
        api: Arc<dyn RemoteApi>,
        repository: Arc<dyn SnapshotRepository>,
        theme_applier: Arc<dyn ThemeApplier>,
    ) -> Self {
        let (updates, _) = watch::channel(StoreState::default());
        Self {
            inner: Arc::new(StoreInner {
                api,
                repository,
                theme_applier,
                state: Mutex::new(StoreState::default()),
                updates,
            }),
        }
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Loads the persisted snapshot into the live state.
    ///
    /// Missing or unreadable data leaves the defaults in place. Nothing is
    /// written back.
    pub async fn hydrate(&self) {
        let snapshot = match self.inner.repository.load().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("No persisted snapshot, starting from defaults");
                PersistedSnapshot::default()
            }
            Err(e) => {
                warn!(error = %e, "Persisted snapshot unreadable, starting from defaults");
                PersistedSnapshot::default()
            }
        };

        if !snapshot.is_consistent() {
            warn!(
                is_authenticated = snapshot.is_authenticated,
                has_user = snapshot.user.is_some(),
                "Persisted session is inconsistent, starting anonymous"
            );
        }

        let (theme, session) = snapshot.into_parts();
        let mut state = self.inner.state.lock().await;
        state.theme = theme;
        state.session = session;
        self.inner.updates.send_replace(state.clone());

        info!(
            authenticated = state.is_authenticated(),
            dark_mode = state.is_dark_mode(),
            "Store hydrated"
        );
    }

    /// Re-applies the current theme to the presentation layer without
    /// changing it. Meant to run once, right after [`hydrate`].
    ///
    /// [`hydrate`]: DashboardStore::hydrate
    pub async fn initialize_theme(&self) {
        let state = self.inner.state.lock().await;
        self.inner.theme_applier.apply(state.theme.mode());
    }

    // ============================================================================
    // Read access
    // ============================================================================

    /// Returns a copy of the whole state.
    pub async fn state(&self) -> StoreState {
        self.inner.state.lock().await.clone()
    }

    /// Receives the new state after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.inner.updates.subscribe()
    }

    pub async fn session(&self) -> Session {
        self.inner.state.lock().await.session.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.state.lock().await.is_authenticated()
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.inner.state.lock().await.user().cloned()
    }

    pub async fn is_dark_mode(&self) -> bool {
        self.inner.state.lock().await.is_dark_mode()
    }

    pub async fn dashboard(&self) -> DashboardCache {
        self.inner.state.lock().await.dashboard.clone()
    }

    // ============================================================================
    // Session
    // ============================================================================

    /// Signs in through the remote client.
    ///
    /// On success the session is replaced atomically (re-login while signed
    /// in swaps the user). On any failure the session is left untouched.
    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
    ) -> std::result::Result<(), LoginError> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            debug!("Login attempted with blank credentials");
            return Err(LoginError::credential(Some(
                MISSING_CREDENTIALS_MESSAGE.to_string(),
            )));
        }

        match self.inner.api.authenticate(identifier, secret).await {
            Ok(response) if response.success => {
                let user = UserProfile::from_remote(response.user, identifier);
                info!(user_id = %user.id, "Login succeeded");
                self.commit(move |state| state.session = Session::authenticated(user))
                    .await;
                Ok(())
            }
            Ok(response) => {
                info!(identifier, "Login rejected by backend");
                Err(LoginError::credential(response.message))
            }
            Err(e) => {
                warn!(error = %e, "Login request failed");
                Err(LoginError::Transport)
            }
        }
    }

    /// Drops the remote credential and returns to the anonymous state.
    ///
    /// Safe to call when already signed out; the credential is cleared
    /// every time.
    pub async fn logout(&self) {
        self.inner.api.set_credential(None).await;
        self.commit(|state| state.session = Session::anonymous()).await;
        info!("Logged out");
    }

    // ============================================================================
    // Theme
    // ============================================================================

    /// Flips between dark and light.
    pub async fn toggle_theme(&self) {
        self.update_theme(|is_dark| !is_dark).await;
    }

    pub async fn set_theme(&self, is_dark: bool) {
        self.update_theme(|_| is_dark).await;
    }

    /// Persists the new preference, then notifies the theme applier.
    async fn update_theme<F>(&self, f: F)
    where
        F: FnOnce(bool) -> bool,
    {
        let applier = self.inner.theme_applier.clone();
        self.commit_then(
            move |state| state.theme.is_dark_mode = f(state.theme.is_dark_mode),
            move |state| applier.apply(state.theme.mode()),
        )
        .await;
    }

    // ============================================================================
    // Dashboard
    // ============================================================================

    /// Fetches summary statistics and coalesces them into the cache.
    ///
    /// A failure keeps the cache as it was and records the error in
    /// `last_dashboard_error`. Racing refreshes apply in completion order.
    ///
    /// Dropping the future part way (timeout, `select!`, aborted task) still
    /// ends the refresh for `is_dashboard_loading`.
    pub async fn refresh_dashboard(&self) {
        self.commit(StoreState::begin_refresh).await;
        let guard = RefreshGuard::new(self.clone());

        match self.inner.api.get_dashboard_stats().await {
            Ok(update) => {
                debug!(?update, "Dashboard stats received");
                self.commit(move |state| {
                    state.dashboard = state.dashboard.coalesce(update);
                    state.last_dashboard_error = None;
                    state.end_refresh();
                    guard.disarm();
                })
                .await;
            }
            Err(e) => {
                warn!(error = %e, "Dashboard refresh failed, keeping cached data");
                self.commit(move |state| {
                    state.last_dashboard_error = Some(e.to_string());
                    state.end_refresh();
                    guard.disarm();
                })
                .await;
            }
        }
    }

    /// Fire-and-forget [`refresh_dashboard`] on the current tokio runtime.
    ///
    /// [`refresh_dashboard`]: DashboardStore::refresh_dashboard
    pub fn spawn_refresh_dashboard(&self) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move { store.refresh_dashboard().await })
    }

    // ============================================================================
    // Catalog fetches
    // ============================================================================

    /// Plan headers, or an empty list if the fetch failed.
    pub async fn fetch_plans(&self) -> Vec<Plan> {
        or_empty("plans", self.try_fetch_plans()).await
    }

    pub async fn fetch_items(&self) -> Vec<Item> {
        or_empty("items", self.try_fetch_items()).await
    }

    pub async fn fetch_customers(&self) -> Vec<Customer> {
        or_empty("customers", self.try_fetch_customers()).await
    }

    pub async fn fetch_customer_categories(&self) -> Vec<CustomerCategory> {
        or_empty("customer categories", self.try_fetch_customer_categories()).await
    }

    pub async fn fetch_areas(&self) -> Vec<Area> {
        or_empty("areas", self.try_fetch_areas()).await
    }

    /// Like [`fetch_plans`] but keeps the failure, for callers that need to
    /// tell "no plans" from "could not load plans".
    ///
    /// [`fetch_plans`]: DashboardStore::fetch_plans
    pub async fn try_fetch_plans(&self) -> Result<Vec<Plan>> {
        self.inner.api.get_all_plans_header().await
    }

    pub async fn try_fetch_items(&self) -> Result<Vec<Item>> {
        self.inner.api.get_all_items().await
    }

    pub async fn try_fetch_customers(&self) -> Result<Vec<Customer>> {
        self.inner.api.get_all_customers().await
    }

    pub async fn try_fetch_customer_categories(&self) -> Result<Vec<CustomerCategory>> {
        self.inner.api.get_customers_category().await
    }

    pub async fn try_fetch_areas(&self) -> Result<Vec<Area>> {
        self.inner.api.get_areas().await
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Applies `f` under the state lock, persists the snapshot if the
    /// persisted subset changed, and notifies subscribers.
    ///
    /// The snapshot is written before the lock is released. A failed write
    /// is logged and the in-memory change stands.
    async fn commit<F>(&self, f: F)
    where
        F: FnOnce(&mut StoreState),
    {
        self.commit_then(f, |_| {}).await;
    }

    /// [`commit`](Self::commit) with a side effect that runs after the
    /// snapshot write, still under the lock and before subscribers hear
    /// about the change.
    async fn commit_then<F, A>(&self, f: F, after: A)
    where
        F: FnOnce(&mut StoreState),
        A: FnOnce(&StoreState),
    {
        let mut state = self.inner.state.lock().await;
        let before = state.persisted();

        f(&mut *state);

        let persisted = state.persisted();
        if persisted != before
            && let Err(e) = self.inner.repository.save(&persisted).await
        {
            warn!(error = %e, "Failed to persist snapshot, keeping in-memory state");
        }

        after(&*state);
        self.inner.updates.send_replace(state.clone());
    }
}

/// Ends an in-flight refresh whose future was dropped before completing.
struct RefreshGuard {
    store: Option<DashboardStore>,
}

impl RefreshGuard {
    fn new(store: DashboardStore) -> Self {
        Self { store: Some(store) }
    }

    /// The refresh ended normally; nothing left to undo.
    fn disarm(mut self) {
        self.store = None;
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        let Some(store) = self.store.take() else {
            return;
        };

        match Handle::try_current() {
            Ok(handle) => {
                debug!("Dashboard refresh dropped before completion");
                handle.spawn(async move { store.commit(StoreState::end_refresh).await });
            }
            Err(_) => warn!("Dashboard refresh dropped outside a runtime, loading flag left set"),
        }
    }
}

async fn or_empty<T, Fut>(what: &'static str, fetch: Fut) -> Vec<T>
where
    Fut: Future<Output = Result<Vec<T>>>,
{
    match fetch.await {
        Ok(records) => {
            debug!(what, count = records.len(), "Fetched");
            records
        }
        Err(e) => {
            warn!(what, error = %e, "Fetch failed, returning empty list");
            Vec::new()
        }
    }
}
