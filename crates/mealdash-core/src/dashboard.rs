//! Dashboard summary cache.
//!
//! The cache lives only in memory. It starts at [`DashboardCache::default`]
//! and is updated by coalescing partial stats responses into it.

use serde::{Deserialize, Serialize};

use crate::serde_ids::string_id;

/// One line of the "recent activity" feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    #[serde(default, alias = "user")]
    pub actor: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, alias = "time")]
    pub relative_time: String,
}

/// One point of the users/revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(default, alias = "name")]
    pub label: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub revenue: f64,
}

/// Cached dashboard summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCache {
    pub total_users: u64,
    pub revenue: f64,
    pub active_users: u64,
    pub conversion_rate: f64,
    pub recent_activity: Vec<ActivityEntry>,
    pub chart_series: Vec<ChartPoint>,
}

/// Partial stats payload; absent fields leave the cached value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsUpdate {
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub active_users: Option<u64>,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub recent_activity: Option<Vec<ActivityEntry>>,
    #[serde(default, alias = "chartData")]
    pub chart_series: Option<Vec<ChartPoint>>,
}

impl DashboardStatsUpdate {
    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl DashboardCache {
    /// Returns a new cache where every field present in `update` replaces
    /// the current value and every absent field is kept.
    pub fn coalesce(&self, update: DashboardStatsUpdate) -> Self {
        Self {
            total_users: update.total_users.unwrap_or(self.total_users),
            revenue: update.revenue.unwrap_or(self.revenue),
            active_users: update.active_users.unwrap_or(self.active_users),
            conversion_rate: update.conversion_rate.unwrap_or(self.conversion_rate),
            recent_activity: update
                .recent_activity
                .unwrap_or_else(|| self.recent_activity.clone()),
            chart_series: update
                .chart_series
                .unwrap_or_else(|| self.chart_series.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> DashboardCache {
        DashboardCache {
            total_users: 120,
            revenue: 4500.5,
            active_users: 80,
            conversion_rate: 3.2,
            recent_activity: vec![ActivityEntry {
                id: "a1".into(),
                actor: "Jane".into(),
                action: "subscribed to Keto Weekly".into(),
                relative_time: "2 min ago".into(),
            }],
            chart_series: vec![ChartPoint {
                label: "Jan".into(),
                users: 40,
                revenue: 1200.0,
            }],
        }
    }

    #[test]
    fn test_default_is_zeroed() {
        let cache = DashboardCache::default();
        assert_eq!(cache.total_users, 0);
        assert_eq!(cache.revenue, 0.0);
        assert!(cache.recent_activity.is_empty());
        assert!(cache.chart_series.is_empty());
    }

    #[test]
    fn test_coalesce_empty_update_keeps_everything() {
        let cache = populated();
        assert_eq!(cache.coalesce(DashboardStatsUpdate::default()), cache);
    }

    #[test]
    fn test_coalesce_replaces_present_fields_only() {
        let cache = populated();
        let update = DashboardStatsUpdate {
            total_users: Some(200),
            chart_series: Some(vec![]),
            ..DashboardStatsUpdate::default()
        };

        let merged = cache.coalesce(update);

        assert_eq!(merged.total_users, 200);
        assert!(merged.chart_series.is_empty());
        assert_eq!(merged.revenue, cache.revenue);
        assert_eq!(merged.active_users, cache.active_users);
        assert_eq!(merged.conversion_rate, cache.conversion_rate);
        assert_eq!(merged.recent_activity, cache.recent_activity);
    }

    #[test]
    fn test_update_parses_partial_payload() {
        let body = r#"{"totalUsers": 10, "chartData": [{"name": "Feb", "users": 3, "revenue": 9.5}]}"#;
        let update: DashboardStatsUpdate = serde_json::from_str(body).unwrap();
        assert_eq!(update.total_users, Some(10));
        assert!(update.revenue.is_none());
        assert_eq!(update.chart_series.as_ref().map(Vec::len), Some(1));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_activity_numeric_id() {
        let body = r#"{"id": 7, "user": "Sam", "action": "paid", "time": "1h ago"}"#;
        let entry: ActivityEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.id, "7");
        assert_eq!(entry.actor, "Sam");
        assert_eq!(entry.relative_time, "1h ago");
    }
}
