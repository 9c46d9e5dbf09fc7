use anyhow::{Result, bail};
use mealdash_application::DashboardStore;

/// Refreshes the cache, then prints it. A failed refresh still prints
/// whatever the cache held, followed by the error.
pub async fn show(store: &DashboardStore, json: bool) -> Result<()> {
    if !store.is_authenticated().await {
        bail!("Not signed in. Run `mealdash login <username>` first.");
    }

    store.refresh_dashboard().await;
    let state = store.state().await;
    let cache = &state.dashboard;

    if json {
        println!("{}", serde_json::to_string_pretty(cache)?);
    } else {
        println!("Total users:     {}", cache.total_users);
        println!("Active users:    {}", cache.active_users);
        println!("Revenue:         {:.2}", cache.revenue);
        println!("Conversion rate: {:.1}%", cache.conversion_rate);

        if !cache.recent_activity.is_empty() {
            println!("\nRecent activity:");
            for entry in &cache.recent_activity {
                println!(
                    "  {} {} ({})",
                    entry.actor, entry.action, entry.relative_time
                );
            }
        }

        if !cache.chart_series.is_empty() {
            println!("\nChart:");
            for point in &cache.chart_series {
                println!(
                    "  {:<8} users={:<6} revenue={:.2}",
                    point.label, point.users, point.revenue
                );
            }
        }
    }

    if let Some(error) = &state.last_dashboard_error {
        eprintln!("Refresh failed: {error}");
    }
    Ok(())
}
