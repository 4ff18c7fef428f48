use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Local id used when a record carries no usable `id`.
pub const UNKNOWN_ID: &str = "unknown";

/// One upstream object. Only `id` is ever read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Record with only an `id` field.
    pub fn with_id(id: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), id.into());
        Self(fields)
    }

    /// The `id` coerced to text.
    ///
    /// Strings are used as-is, numbers and booleans by their JSON text.
    /// Missing, `null` and composite ids become [`UNKNOWN_ID`].
    pub fn id(&self) -> String {
        match self.0.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => UNKNOWN_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_id() {
        assert_eq!(Record::with_id("DB00316").id(), "DB00316");
    }

    #[test]
    fn test_missing_id_falls_back() {
        let record: Record = serde_json::from_value(json!({"name": "aspirin"})).unwrap();
        assert_eq!(record.id(), UNKNOWN_ID);
    }

    #[test]
    fn test_scalar_ids_coerced() {
        assert_eq!(Record::with_id(42).id(), "42");
        assert_eq!(Record::with_id(true).id(), "true");
        assert_eq!(Record::with_id(Value::Null).id(), UNKNOWN_ID);
        assert_eq!(Record::with_id(json!(["a"])).id(), UNKNOWN_ID);
    }
}
