//! Serde support for Row: classifying raw JSON into the typed value union.
//!
//! ## Read format (deserialization)
//!
//! Incoming rows are plain JSON objects with no schema. Classification:
//! - numbers become `Int`/`Long`/`Float` depending on width
//! - nested objects become `Record` (flattened through with a dotted prefix)
//! - arrays whose elements are all objects become `Records` (child rows)
//! - any other array stays opaque as `Json`
//! - strings stay strings; date-typed columns are parsed on demand by the
//!   structured filter, never sniffed here
//!
//! ## Write format (serialization)
//!
//! Values serialize untagged, so a deserialized row writes back out as the
//! same shape of JSON object it came from.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::Row;
use super::Value;

/// Converts a raw JSON value into the typed value union.
pub fn json_to_value(raw: serde_json::Value) -> Value {
    match raw {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Value::Int(small),
                    Err(_) => Value::Long(i),
                }
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // u64 beyond i64 range; keep it opaque rather than lose it
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            if !items.is_empty() && items.iter().all(serde_json::Value::is_object) {
                let rows = items
                    .into_iter()
                    .map(|item| match json_to_value(item) {
                        Value::Record(row) => *row,
                        _ => unreachable!("is_object checked above"),
                    })
                    .collect();
                Value::Records(rows)
            } else {
                Value::Json(serde_json::Value::Array(items))
            }
        }
        serde_json::Value::Object(map) => {
            let fields = map
                .into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect();
            Value::Record(Box::new(Row { fields }))
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(json_to_value(raw))
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = HashMap::<String, Value>::deserialize(deserializer)?;
        Ok(Row { fields })
    }
}

impl From<serde_json::Value> for Row {
    /// Converts a JSON value into a row.
    ///
    /// Non-object JSON yields an empty row; calling screens hand the engine
    /// arrays of objects, anything else carries no fields to present.
    fn from(raw: serde_json::Value) -> Self {
        match json_to_value(raw) {
            Value::Record(row) => *row,
            _ => Row::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_scalars() {
        let row: Row = serde_json::from_value(json!({
            "name": "Contoso",
            "count": 3,
            "big": 9_000_000_000i64,
            "ratio": 0.5,
            "active": true,
            "gone": null,
        }))
        .unwrap();

        assert_eq!(row.get("name"), Some(&Value::String("Contoso".into())));
        assert_eq!(row.get("count"), Some(&Value::Int(3)));
        assert_eq!(row.get("big"), Some(&Value::Long(9_000_000_000)));
        assert_eq!(row.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(row.get("active"), Some(&Value::Bool(true)));
        assert_eq!(row.get("gone"), Some(&Value::Null));
    }

    #[test]
    fn test_deserialize_nested_object_becomes_record() {
        let row: Row = serde_json::from_value(json!({
            "address": { "city": "Oslo" },
        }))
        .unwrap();

        assert_eq!(
            row.get_path("address.city"),
            Some(&Value::String("Oslo".into()))
        );
    }

    #[test]
    fn test_deserialize_object_array_becomes_records() {
        let row: Row = serde_json::from_value(json!({
            "purchaseItems": [{ "qty": 2 }, { "qty": 5 }],
        }))
        .unwrap();

        assert_eq!(row.child_rows("purchaseItems").len(), 2);
    }

    #[test]
    fn test_deserialize_scalar_array_stays_opaque() {
        let row: Row = serde_json::from_value(json!({
            "tags": ["a", "b"],
        }))
        .unwrap();

        assert!(matches!(row.get("tags"), Some(Value::Json(_))));
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let source = json!({
            "id": 1,
            "name": "Zed",
            "address": { "city": "Oslo" },
            "items": [{ "qty": 2 }],
        });
        let row: Row = serde_json::from_value(source.clone()).unwrap();
        let back = serde_json::to_value(&row).unwrap();

        assert_eq!(back, source);
    }
}
