//! Catalog records returned by the fetch family.
//!
//! The backend owns these shapes. Each record types the fields the dashboard
//! renders and keeps everything else in `extra`, so a record fetched and
//! re-serialized loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_ids::{optional_string_id, string_id};

/// Subscription plan header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    #[serde(default, alias = "planName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Menu item that plans are composed of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    #[serde(default, alias = "itemName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    #[serde(default, alias = "customerName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub area_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCategory {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    #[serde(default, alias = "categoryName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Delivery area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    #[serde(default, alias = "areaName")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_keeps_unknown_fields() {
        let body = r#"{"id": 3, "planName": "Keto Weekly", "price": 49.0, "mealsPerDay": 2}"#;
        let plan: Plan = serde_json::from_str(body).unwrap();
        assert_eq!(plan.id, "3");
        assert_eq!(plan.name, "Keto Weekly");
        assert_eq!(plan.price, Some(49.0));
        assert_eq!(plan.extra.get("mealsPerDay"), Some(&Value::from(2)));

        let back = serde_json::to_value(&plan).unwrap();
        assert_eq!(back["mealsPerDay"], Value::from(2));
    }

    #[test]
    fn test_customer_foreign_keys() {
        let body = r#"{"id": "c-9", "name": "Ana", "areaId": 4, "categoryId": null}"#;
        let customer: Customer = serde_json::from_str(body).unwrap();
        assert_eq!(customer.area_id.as_deref(), Some("4"));
        assert!(customer.category_id.is_none());
    }

    #[test]
    fn test_area_minimal() {
        let area: Area = serde_json::from_str(r#"{"id": 1, "areaName": "North"}"#).unwrap();
        assert_eq!(area.name, "North");
        assert!(area.extra.is_empty());
    }
}
