//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore wraps every value in a single-key object naming its type, e.g.
//! `{"integerValue": "42"}` or `{"mapValue": {"fields": {...}}}`. Integers
//! travel as strings.

use serde_json::{json, Map, Number, Value};

use crate::error::{Error, Result};

/// Encode one JSON value as a Firestore value.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            // u64 above i64::MAX and all floats
            None => json!({ "doubleValue": n.as_f64().unwrap_or(f64::NAN) }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode every entry of a document's field map.
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), encode(v)))
        .collect()
}

/// Decode one Firestore value into plain JSON.
///
/// Timestamps, references and bytes come back as their string form.
/// Non-finite doubles have no JSON form and decode to `null`.
pub fn decode(value: &Value) -> Result<Value> {
    let (kind, inner) = match value.as_object().filter(|o| o.len() == 1) {
        Some(obj) => obj.iter().next().map(|(k, v)| (k.as_str(), v)).unwrap_or(("", value)),
        None => return Err(Error::Decode(format!("Not a Firestore value: {}", value))),
    };

    match kind {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| Error::Decode(format!("Bad booleanValue: {}", inner))),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed
                .map(Value::from)
                .ok_or_else(|| Error::Decode(format!("Bad integerValue: {}", inner)))
        }
        "doubleValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<f64>().ok(),
                other => other.as_f64(),
            };
            parsed
                .map(|f| Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null))
                .ok_or_else(|| Error::Decode(format!("Bad doubleValue: {}", inner)))
        }
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| Error::Decode(format!("Bad {}: {}", kind, inner))),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => match inner.get("values") {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(values)) => values.iter().map(decode).collect::<Result<Vec<_>>>().map(Value::Array),
            Some(other) => Err(Error::Decode(format!("Bad arrayValue: {}", other))),
        },
        "mapValue" => match inner.get("fields") {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            Some(other) => Err(Error::Decode(format!("Bad mapValue: {}", other))),
        },
        other => Err(Error::Decode(format!("Unknown Firestore value type: {}", other))),
    }
}

/// Decode a document's `fields` object.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>> {
    fields
        .iter()
        .map(|(k, v)| decode(v).map(|d| (k.clone(), d)))
        .collect()
}
