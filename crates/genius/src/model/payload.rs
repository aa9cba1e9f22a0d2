use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Structured data decoded from a response body.
///
/// The service returns objects, arrays, or occasionally bare scalars; each shape
/// is its own variant so consumers have to say which ones they handle.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Mapping(Map<String, Value>),
    Sequence(Vec<Value>),
    /// Null, boolean, number, or string. Never an object or array.
    Scalar(Value),
}

impl Payload {
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Sequence(_) | Self::Scalar(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Mapping(map) => Value::Object(map),
            Self::Sequence(items) => Value::Array(items),
            Self::Scalar(value) => value,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            Value::Array(items) => Self::Sequence(items),
            scalar => Self::Scalar(scalar),
        }
    }
}

/// A fully unwrapped service result.
///
/// Only the envelope normalizer builds these, so holding one means any
/// `reports` wrapper has already been resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultRecord(Payload);

impl ResultRecord {
    pub(crate) fn new(payload: Payload) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &Payload {
        &self.0
    }

    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        self.0.as_mapping()
    }

    /// Look up a field when the record is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    pub fn into_value(self) -> Value {
        self.0.into_value()
    }

    /// Deserialize the record into a typed view.
    pub fn deserialize<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.0.clone().into_value())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_map_onto_matching_variants() {
        assert!(matches!(Payload::from(json!({"a": 1})), Payload::Mapping(_)));
        assert!(matches!(Payload::from(json!([1, 2])), Payload::Sequence(_)));
        assert!(matches!(Payload::from(json!("ok")), Payload::Scalar(_)));
        assert!(matches!(Payload::from(Value::Null), Payload::Scalar(_)));
    }

    #[test]
    fn record_serializes_as_its_inner_value() {
        let record = ResultRecord::new(Payload::from(json!({"status": "success"})));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"status": "success"})
        );
        assert_eq!(record.get("status"), Some(&json!("success")));
    }
}
