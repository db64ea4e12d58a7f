//! Field deserializers that never fail.
//!
//! The server has shipped several schemas over time, so every field is read
//! through `serde_json::Value` and anything unexpected degrades to `None` (or
//! an empty list) instead of rejecting the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Identifier sent as a string or a number. Blank strings count as absent.
pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Free text. Numbers are rendered as text; other shapes are dropped.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => Some(raw),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Integer-encoded boolean. Only `1` (or `true`, `"1"`, `"true"`) is set.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::Number(number) => Some(number.as_i64() == Some(1)),
        Value::String(raw) => {
            let raw = raw.trim();
            Some(raw == "1" || raw.eq_ignore_ascii_case("true"))
        }
        _ => Some(false),
    })
}

/// List of nested records. Elements that do not decode are skipped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Single nested record. Anything but an object is treated as absent.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "id")]
        id: Option<String>,
        #[serde(deserialize_with = "text")]
        name: Option<String>,
        #[serde(deserialize_with = "flag")]
        active: Option<bool>,
        #[serde(deserialize_with = "list")]
        tags: Vec<Tag>,
    }

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Tag {
        label: String,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn id_accepts_strings_and_numbers() {
        assert_eq!(probe(json!({ "id": 17 })).id.as_deref(), Some("17"));
        assert_eq!(probe(json!({ "id": " abc " })).id.as_deref(), Some("abc"));
        assert_eq!(probe(json!({ "id": "  " })).id, None);
        assert_eq!(probe(json!({ "id": null })).id, None);
        assert_eq!(probe(json!({ "id": [1] })).id, None);
        assert_eq!(probe(json!({})).id, None);
    }

    #[test]
    fn text_keeps_strings_verbatim() {
        assert_eq!(probe(json!({ "name": " Ada " })).name.as_deref(), Some(" Ada "));
        assert_eq!(probe(json!({ "name": 5 })).name.as_deref(), Some("5"));
        assert_eq!(probe(json!({ "name": { "x": 1 } })).name, None);
    }

    #[test]
    fn flag_only_sets_on_one() {
        assert_eq!(probe(json!({ "active": 1 })).active, Some(true));
        assert_eq!(probe(json!({ "active": 0 })).active, Some(false));
        assert_eq!(probe(json!({ "active": 2 })).active, Some(false));
        assert_eq!(probe(json!({ "active": "1" })).active, Some(true));
        assert_eq!(probe(json!({ "active": true })).active, Some(true));
        assert_eq!(probe(json!({ "active": "yes" })).active, Some(false));
        assert_eq!(probe(json!({})).active, None);
    }

    #[test]
    fn list_skips_malformed_elements() {
        let parsed = probe(json!({
            "tags": [{ "label": "a" }, 3, { "nope": true }, { "label": "b" }]
        }));
        assert_eq!(
            parsed.tags,
            vec![
                Tag { label: "a".to_string() },
                Tag { label: "b".to_string() }
            ]
        );
        assert!(probe(json!({ "tags": "oops" })).tags.is_empty());
        assert!(probe(json!({ "tags": null })).tags.is_empty());
    }
}
