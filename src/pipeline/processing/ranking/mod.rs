// Ranked dedup selection: drop invalid timestamps, rank newest first,
// keep the best occurrence per identity and stop at the limit.

pub mod select;
pub mod timestamp;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{present_field, FieldValue};

pub use select::{select_ranked, top_n_unique, RankedSelection};
pub use timestamp::{coerce_number, is_valid_timestamp, timestamp_value};

/// A time-stamped record. The pipeline only reads it; every stage builds new collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord<K = String> {
    #[serde(rename = "userId")]
    pub identity: K,
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<FieldValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<K> RankedRecord<K> {
    pub fn new(identity: K, timestamp: impl Into<FieldValue>) -> Self {
        Self {
            identity,
            timestamp: Some(timestamp.into()),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

impl<K: DeserializeOwned> RankedRecord<K> {
    /// Reads a record out of an arbitrary JSON value: an object carrying `userId`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordIdentity;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_any_identity_shape() {
        let record = RankedRecord::<RecordIdentity>::from_value(
            &json!({"userId": 2, "timestamp": "5", "device": "tv"}),
        )
        .unwrap();

        assert_eq!(record.identity, RecordIdentity::new(json!(2)));
        assert_eq!(record.timestamp, Some(FieldValue::text("5")));
        assert_eq!(record.extra.get("device"), Some(&json!("tv")));
    }

    #[test]
    fn test_from_value_needs_an_object_with_identity() {
        assert!(RankedRecord::<RecordIdentity>::from_value(&json!({"timestamp": "5"})).is_none());
        assert!(RankedRecord::<RecordIdentity>::from_value(&json!("junk")).is_none());
        assert!(RankedRecord::<String>::from_value(&json!({"userId": 2, "timestamp": "5"})).is_none());
    }
}
