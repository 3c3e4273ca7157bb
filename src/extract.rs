//! Envelope unwrapping for API responses
//!
//! Stratus APIs wrap the real payload of most responses in a JSON object
//! under a single named key, e.g. `{"metric_alarms": [...]}` or
//! `{"server": {...}}`. The helpers here unwrap that envelope and decode
//! the inner value into the caller's type, checking that the JSON kind
//! under the key matches what the target expects and reporting a
//! descriptive error when it does not.
//!
//! Response types that extend a shared base do so with `#[serde(flatten)]`;
//! decoding runs per element so custom `Deserialize` impls on composed
//! sub-structs always fire.

use crate::error::{json_kind, Result, SdkError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body directly, without an envelope.
pub fn into<T: DeserializeOwned>(body: Value) -> Result<T> {
    Ok(serde_json::from_value(body)?)
}

/// Decode a raw response body. This is the transport layer's entry point;
/// resource operations go through the envelope-aware helpers instead.
pub fn from_str<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

/// Unwrap `body[label]` and decode it into a struct.
///
/// The value under the key must be a JSON object; anything else (including
/// `null`) is a [`SdkError::KindMismatch`].
pub fn into_struct<T: DeserializeOwned>(body: Value, label: &str) -> Result<T> {
    let inner = unwrap(body, label)?;

    if !inner.is_object() {
        return Err(SdkError::KindMismatch {
            key: label.to_string(),
            expected: "an object",
            found: json_kind(&inner),
        });
    }

    Ok(serde_json::from_value(inner)?)
}

/// Unwrap `body[label]` and decode it into a vector.
///
/// Elements are decoded one at a time so a malformed element is reported
/// with its index rather than as an opaque failure of the whole array.
pub fn into_slice<T: DeserializeOwned>(body: Value, label: &str) -> Result<Vec<T>> {
    let inner = unwrap(body, label)?;

    let Value::Array(elements) = inner else {
        return Err(SdkError::KindMismatch {
            key: label.to_string(),
            expected: "an array",
            found: json_kind(&inner),
        });
    };

    let mut out = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let item = serde_json::from_value(element).map_err(|source| SdkError::Element {
            key: label.to_string(),
            index,
            source,
        })?;
        out.push(item);
    }

    Ok(out)
}

/// Take the value under `label` out of the response object.
fn unwrap(body: Value, label: &str) -> Result<Value> {
    let Value::Object(mut map) = body else {
        return Err(SdkError::KindMismatch {
            key: label.to_string(),
            expected: "an object",
            found: json_kind(&body),
        });
    };

    map.remove(label).ok_or_else(|| SdkError::MissingKey {
        key: label.to_string(),
    })
}
