//! Scriptable collaborators for exercising the store without a backend.
//!
//! Presentation code can use these to test against a real `DashboardStore`.

use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mealdash_core::catalog::{Area, Customer, CustomerCategory, Item, Plan};
use mealdash_core::dashboard::DashboardStatsUpdate;
use mealdash_core::error::{DashboardError, Result};
use mealdash_core::remote::{AuthResponse, RemoteApi};
use mealdash_core::snapshot::{PersistedSnapshot, SnapshotRepository};
use mealdash_core::theme::{ThemeApplier, ThemeMode};
use tokio::sync::Mutex;

/// [`RemoteApi`] returning canned results.
///
/// Defaults: logins are rejected without a message, stats are empty and
/// every list is empty.
pub struct StubRemoteApi {
    auth: Mutex<Result<AuthResponse>>,
    stats: Mutex<Result<DashboardStatsUpdate>>,
    stats_delay: Duration,
    stats_script: Mutex<VecDeque<(Duration, Result<DashboardStatsUpdate>)>>,
    plans: Mutex<Result<Vec<Plan>>>,
    items: Mutex<Result<Vec<Item>>>,
    customers: Mutex<Result<Vec<Customer>>>,
    categories: Mutex<Result<Vec<CustomerCategory>>>,
    areas: Mutex<Result<Vec<Area>>>,
    authenticate_calls: AtomicUsize,
    credentials: Mutex<Vec<Option<String>>>,
}

impl Default for StubRemoteApi {
    fn default() -> Self {
        Self {
            auth: Mutex::new(Ok(AuthResponse::rejected(None))),
            stats: Mutex::new(Ok(DashboardStatsUpdate::default())),
            stats_delay: Duration::ZERO,
            stats_script: Mutex::new(VecDeque::new()),
            plans: Mutex::new(Ok(Vec::new())),
            items: Mutex::new(Ok(Vec::new())),
            customers: Mutex::new(Ok(Vec::new())),
            categories: Mutex::new(Ok(Vec::new())),
            areas: Mutex::new(Ok(Vec::new())),
            authenticate_calls: AtomicUsize::new(0),
            credentials: Mutex::new(Vec::new()),
        }
    }
}

impl StubRemoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub whose every call fails with a transport error.
    pub fn unreachable() -> Self {
        let err = || DashboardError::transport("connection refused");
        Self {
            auth: Mutex::new(Err(err())),
            stats: Mutex::new(Err(err())),
            plans: Mutex::new(Err(err())),
            items: Mutex::new(Err(err())),
            customers: Mutex::new(Err(err())),
            categories: Mutex::new(Err(err())),
            areas: Mutex::new(Err(err())),
            ..Self::default()
        }
    }

    pub fn with_auth(self, auth: Result<AuthResponse>) -> Self {
        Self {
            auth: Mutex::new(auth),
            ..self
        }
    }

    pub fn with_stats(self, stats: Result<DashboardStatsUpdate>) -> Self {
        Self {
            stats: Mutex::new(stats),
            ..self
        }
    }

    /// Every unscripted stats call waits `delay` before answering.
    pub fn with_stats_delay(self, delay: Duration) -> Self {
        Self {
            stats_delay: delay,
            ..self
        }
    }

    /// Answers for the next stats calls, in call order: each waits its
    /// delay, then returns its result. Once used up, calls fall back to the
    /// regular stats result.
    pub fn with_stats_script(
        self,
        script: Vec<(Duration, Result<DashboardStatsUpdate>)>,
    ) -> Self {
        Self {
            stats_script: Mutex::new(script.into()),
            ..self
        }
    }

    pub fn with_plans(self, plans: Result<Vec<Plan>>) -> Self {
        Self {
            plans: Mutex::new(plans),
            ..self
        }
    }

    pub fn with_areas(self, areas: Result<Vec<Area>>) -> Self {
        Self {
            areas: Mutex::new(areas),
            ..self
        }
    }

    pub async fn set_auth(&self, auth: Result<AuthResponse>) {
        *self.auth.lock().await = auth;
    }

    pub async fn set_stats(&self, stats: Result<DashboardStatsUpdate>) {
        *self.stats.lock().await = stats;
    }

    /// Number of `authenticate` calls received.
    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    /// Every value passed to `set_credential`, oldest first.
    pub async fn credential_log(&self) -> Vec<Option<String>> {
        self.credentials.lock().await.clone()
    }
}

#[async_trait]
impl RemoteApi for StubRemoteApi {
    async fn authenticate(&self, _identifier: &str, _secret: &str) -> Result<AuthResponse> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        self.auth.lock().await.clone()
    }

    async fn set_credential(&self, token: Option<String>) {
        self.credentials.lock().await.push(token);
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStatsUpdate> {
        let scripted = self.stats_script.lock().await.pop_front();
        let (delay, result) = match scripted {
            Some(answer) => answer,
            None => (self.stats_delay, self.stats.lock().await.clone()),
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn get_all_plans_header(&self) -> Result<Vec<Plan>> {
        self.plans.lock().await.clone()
    }

    async fn get_all_items(&self) -> Result<Vec<Item>> {
        self.items.lock().await.clone()
    }

    async fn get_all_customers(&self) -> Result<Vec<Customer>> {
        self.customers.lock().await.clone()
    }

    async fn get_customers_category(&self) -> Result<Vec<CustomerCategory>> {
        self.categories.lock().await.clone()
    }

    async fn get_areas(&self) -> Result<Vec<Area>> {
        self.areas.lock().await.clone()
    }
}

/// Repository whose storage is broken: loads fail as corrupt, saves fail
/// as out of space.
#[derive(Debug, Default)]
pub struct BrokenSnapshotRepository {
    save_attempts: AtomicUsize,
}

impl BrokenSnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_attempts(&self) -> usize {
        self.save_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotRepository for BrokenSnapshotRepository {
    async fn load(&self) -> Result<Option<PersistedSnapshot>> {
        Err(DashboardError::Serialization {
            format: "JSON".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        })
    }

    async fn save(&self, _snapshot: &PersistedSnapshot) -> Result<()> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(DashboardError::io("No space left on device"))
    }
}

/// Remembers every applied theme mode.
#[derive(Debug, Default)]
pub struct RecordingThemeApplier {
    applied: StdMutex<Vec<ThemeMode>>,
}

impl RecordingThemeApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Vec<ThemeMode> {
        self.applied
            .lock()
            .map(|applied| applied.clone())
            .unwrap_or_default()
    }
}

impl ThemeApplier for RecordingThemeApplier {
    fn apply(&self, mode: ThemeMode) {
        if let Ok(mut applied) = self.applied.lock() {
            applied.push(mode);
        }
    }
}
