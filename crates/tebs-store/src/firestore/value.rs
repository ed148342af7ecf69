//! Firestore typed-value JSON codec
//!
//! The REST API wraps every field value in a one-key type tag
//! (`{"stringValue": "ERL"}`, `{"integerValue": "42"}`, ...). This module
//! converts between that shape and plain `serde_json` values. Integers are
//! transported as strings by the API.

use crate::error::StoreError;
use serde_json::{json, Map, Number, Value};

/// Encode a plain JSON value into Firestore typed-value form
pub(crate) fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                json!({ "integerValue": int.to_string() })
            } else {
                json!({ "doubleValue": number.as_f64() })
            }
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Encode a plain field map into Firestore typed-value form
pub(crate) fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode(value)))
        .collect()
}

/// Decode a Firestore typed value into a plain JSON value
pub(crate) fn decode(value: &Value) -> Result<Value, StoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::decode("typed value is not an object"))?;
    let (tag, inner) = object
        .iter()
        .next()
        .ok_or_else(|| StoreError::decode("typed value has no tag"))?;

    match tag.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" | "geoPointValue" => Ok(inner.clone()),
        // timestamps, references and bytes stay in their string transport form
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner.clone()),
        "integerValue" => {
            let int = match inner {
                Value::String(raw) => raw
                    .parse::<i64>()
                    .map_err(|_| StoreError::decode(format!("bad integerValue: {raw}")))?,
                Value::Number(number) => number
                    .as_i64()
                    .ok_or_else(|| StoreError::decode(format!("bad integerValue: {number}")))?,
                other => return Err(StoreError::decode(format!("bad integerValue: {other}"))),
            };
            Ok(Value::Number(Number::from(int)))
        }
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            Ok(Value::Array(
                items.iter().map(decode).collect::<Result<_, _>>()?,
            ))
        }
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            Ok(Value::Object(decode_fields(&fields)?))
        }
        other => Err(StoreError::decode(format!("unknown value tag: {other}"))),
    }
}

/// Decode a Firestore typed field map into a plain field map
pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode(value)?)))
        .collect()
}
