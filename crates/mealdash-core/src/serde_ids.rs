//! Identifier decoding shared by remote payloads.
//!
//! The backend is inconsistent about ids: some endpoints send numbers, some
//! send strings. Everything is normalized to `String` on the way in.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_id(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Deserializes a required id that may arrive as a number or a string.
pub(crate) fn string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_id(value).unwrap_or_default())
}

/// Deserializes an optional id that may arrive as a number or a string.
pub(crate) fn optional_string_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "string_id")]
        id: String,
        #[serde(default, deserialize_with = "optional_string_id")]
        parent: Option<String>,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let record: Record = serde_json::from_str(r#"{"id": 42, "parent": "p-1"}"#).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.parent.as_deref(), Some("p-1"));

        let record: Record = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(record.id, "abc");
        assert!(record.parent.is_none());
    }

    #[test]
    fn test_null_optional_id() {
        let record: Record = serde_json::from_str(r#"{"id": 1, "parent": null}"#).unwrap();
        assert!(record.parent.is_none());
    }
}
