use std::fmt::Display;

use anyhow::Result;
use mealdash_application::DashboardStore;
use serde::Serialize;

fn print_rows<T: Serialize>(rows: &[T], json: bool, line: impl Fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("(none)");
    }
    for row in rows {
        println!("{}", line(row));
    }
    Ok(())
}

fn or_dash<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

pub async fn plans(store: &DashboardStore, json: bool) -> Result<()> {
    let plans = store.fetch_plans().await;
    print_rows(&plans, json, |plan| {
        format!(
            "{:<6} {:<24} price={} days={}",
            plan.id,
            plan.name,
            or_dash(&plan.price),
            or_dash(&plan.duration_days)
        )
    })
}

pub async fn items(store: &DashboardStore, json: bool) -> Result<()> {
    let items = store.fetch_items().await;
    print_rows(&items, json, |item| {
        format!(
            "{:<6} {:<24} {} price={}",
            item.id,
            item.name,
            or_dash(&item.category),
            or_dash(&item.price)
        )
    })
}

pub async fn customers(store: &DashboardStore, json: bool) -> Result<()> {
    let customers = store.fetch_customers().await;
    print_rows(&customers, json, |customer| {
        format!(
            "{:<6} {:<24} {} area={}",
            customer.id,
            customer.name,
            or_dash(&customer.email),
            or_dash(&customer.area_id)
        )
    })
}

pub async fn categories(store: &DashboardStore, json: bool) -> Result<()> {
    let categories = store.fetch_customer_categories().await;
    print_rows(&categories, json, |category| {
        format!("{:<6} {}", category.id, category.name)
    })
}

pub async fn areas(store: &DashboardStore, json: bool) -> Result<()> {
    let areas = store.fetch_areas().await;
    print_rows(&areas, json, |area| format!("{:<6} {}", area.id, area.name))
}
