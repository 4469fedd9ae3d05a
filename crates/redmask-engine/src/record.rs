//! Log record model.
//!
//! A record carries named attributes and an optional body. Attributes listed
//! in the engine's field list are masked by their string form; string bodies
//! are scanned with the detection patterns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Attributes in insertion order.
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,

    /// Record body. Only string bodies are masked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl LogRecord {
    /// Creates a record with a string body and no attributes.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            attributes: IndexMap::new(),
            body: Some(Value::String(body.into())),
        }
    }

    /// Adds a string attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the body when it is a string.
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_ref().and_then(Value::as_str)
    }

    /// Returns the attribute as a string, if present and a string.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

/// A batch of log records handed to the engine in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogBatch {
    #[serde(default)]
    pub records: Vec<LogRecord>,
}

impl LogBatch {
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of masking one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// Attributes replaced with a masked value.
    pub fields_masked: usize,
    /// Attributes left unmasked because the store call failed.
    pub fields_failed: usize,
    /// Whether the body text changed.
    pub body_masked: bool,
}

/// Totals for a processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub records: usize,
    pub fields_masked: usize,
    pub fields_failed: usize,
    pub bodies_masked: usize,
}

impl BatchSummary {
    /// Adds one record's outcome to the totals.
    pub fn absorb(&mut self, outcome: RecordOutcome) {
        self.records += 1;
        self.fields_masked += outcome.fields_masked;
        self.fields_failed += outcome.fields_failed;
        if outcome.body_masked {
            self.bodies_masked += 1;
        }
    }
}

/// String form of an attribute value, as masked by the engine.
///
/// Strings are taken verbatim, null becomes the empty string and every other
/// value uses its JSON text (`42`, `true`, `{"a":1}`).
pub fn attribute_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_text() {
        assert_eq!(attribute_text(&json!("alice")), "alice");
        assert_eq!(attribute_text(&json!(8080)), "8080");
        assert_eq!(attribute_text(&json!(true)), "true");
        assert_eq!(attribute_text(&Value::Null), "");
        assert_eq!(attribute_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let record: LogRecord = serde_json::from_str(r#"{"body":"hello"}"#).unwrap();

        assert!(record.attributes.is_empty());
        assert_eq!(record.body_str(), Some("hello"));
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let record = LogRecord::default()
            .attribute("zeta", "1")
            .attribute("alpha", "2");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"attributes":{"zeta":"1","alpha":"2"}}"#);
    }

    #[test]
    fn test_summary_absorb() {
        let mut summary = BatchSummary::default();
        summary.absorb(RecordOutcome {
            fields_masked: 2,
            fields_failed: 1,
            body_masked: true,
        });
        summary.absorb(RecordOutcome::default());

        assert_eq!(summary.records, 2);
        assert_eq!(summary.fields_masked, 2);
        assert_eq!(summary.fields_failed, 1);
        assert_eq!(summary.bodies_masked, 1);
    }
}
