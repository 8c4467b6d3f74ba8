//! Query-string encoding for GET requests.
//!
//! GET calls carry their `data` as query parameters instead of a body. This
//! module flattens a JSON object into key/value pairs.

use crate::{Error, Result};
use serde_json::Value;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Flatten a JSON object into query pairs.
    ///
    /// Strings are used verbatim, numbers and booleans through their JSON
    /// rendering, `null` fields are skipped, arrays become repeated keys and
    /// nested objects are sent as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `data` is not a JSON object.
    pub fn from_value(data: &Value) -> Result<Self> {
        let Value::Object(map) = data else {
            return Err(Error::Serialization(format!(
                "query data must be a JSON object, got `{data}`"
            )));
        };

        let mut params = Self::new();
        for (key, value) in map {
            match value {
                Value::Array(items) => {
                    for item in items {
                        params.push_value(key, item);
                    }
                }
                other => params.push_value(key, other),
            }
        }
        Ok(params)
    }

    fn push_value(&mut self, key: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(text) => self.pairs.push((key.to_string(), text.clone())),
            other => self.pairs.push((key.to_string(), other.to_string())),
        }
    }

    /// Borrow the collected pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;
    use crate::Error;
    use serde_json::json;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn from_value_with_only_nulls_is_empty() {
        let params = QueryParams::from_value(&json!({ "cursor": null })).unwrap();
        assert!(params.pairs().is_empty());
    }

    #[test]
    fn from_value_flattens_scalars() {
        let params = QueryParams::from_value(&json!({
            "tracking": "1ZW470V80310800043",
            "limit": 5,
            "residential": true,
            "cursor": null
        }))
        .unwrap();

        let pairs = params.pairs();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&pair("tracking", "1ZW470V80310800043")));
        assert!(pairs.contains(&pair("limit", "5")));
        assert!(pairs.contains(&pair("residential", "true")));
    }

    #[test]
    fn from_value_repeats_array_keys() {
        let params = QueryParams::from_value(&json!({ "events": ["Voided", "Delivered"] })).unwrap();
        assert_eq!(
            params.pairs(),
            &[pair("events", "Voided"), pair("events", "Delivered")]
        );
    }

    #[test]
    fn from_value_encodes_nested_objects_as_json() {
        let params = QueryParams::from_value(&json!({ "filter": { "carrier": "ups" } })).unwrap();
        assert_eq!(params.pairs(), &[pair("filter", r#"{"carrier":"ups"}"#)]);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        let err = QueryParams::from_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
