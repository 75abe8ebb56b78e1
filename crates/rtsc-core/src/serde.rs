//! Canonical JSON helpers.
//!
//! Payloads are routed through [`serde_json::Value`] so object keys come
//! out sorted, which keeps CLI output and report files stable.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{ErrorInfo, RtscError};

fn map_err(err: serde_json::Error, code: &str) -> RtscError {
    RtscError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value to pretty, key-sorted JSON bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, RtscError> {
    let value = serde_json::to_value(value).map_err(|err| map_err(err, "json-serialize"))?;
    serde_json::to_vec_pretty(&value).map_err(|err| map_err(err, "json-serialize"))
}

/// Serializes a value to a pretty, key-sorted JSON string.
pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, RtscError> {
    let bytes = to_canonical_json_bytes(value)?;
    String::from_utf8(bytes)
        .map_err(|err| RtscError::Serde(ErrorInfo::new("json-utf8", err.to_string())))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RtscError> {
    serde_json::from_slice(bytes).map_err(|err| map_err(err, "json-deserialize"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn keys_are_sorted() {
        let mut map = HashMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        let text = to_canonical_json_string(&map).unwrap();
        let alpha = text.find("alpha").unwrap();
        let zeta = text.find("zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = from_json_slice::<HashMap<String, f64>>(b"{not json").unwrap_err();
        assert_eq!(err.kind(), "serde");
        assert_eq!(err.info().code, "json-deserialize");
    }
}
