//! JSON payload decoding and re-encoding
//!
//! A payload cell holds a JSON object. Its scalar members become the fields
//! of a [`Record`]; the decoded object is kept so that unchanged members are
//! written back with their original JSON type and in their original order.

use crate::domain::{GuardianError, Record, Result};
use serde_json::{Map, Value};

/// Decoded payload cell
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    object: Map<String, Value>,
    record: Record,
}

impl Payload {
    /// Parse a payload cell
    ///
    /// Strings map to themselves, numbers (digits exactly as written) and
    /// booleans to their textual form, and `null`, arrays and nested objects to an absent value.
    ///
    /// # Errors
    ///
    /// Returns [`GuardianError::Payload`] if the text is not valid JSON or
    /// not a JSON object.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| GuardianError::Payload(format!("invalid JSON: {e}")))?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(GuardianError::Payload(format!(
                    "expected a JSON object, found {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut record = Record::with_capacity(object.len());
        for (key, value) in &object {
            record.insert(key.clone(), scalar_text(value));
        }

        Ok(Self { object, record })
    }

    /// Fields decoded from the payload
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Re-encode the payload with the values of `redacted`
    ///
    /// Members whose value is unchanged keep their original JSON value and
    /// type; rewritten members become JSON strings.
    pub fn render(&self, redacted: &Record) -> Result<String> {
        let mut object = Map::with_capacity(self.object.len());

        for (key, original) in &self.object {
            let before = self.record.get(key);
            let after = redacted.get(key);

            let value = match after {
                Some(text) if after != before => Value::String(text.to_string()),
                _ => original.clone(),
            };
            object.insert(key.clone(), value);
        }

        Ok(serde_json::to_string(&Value::Object(object))?)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        let payload = Payload::parse(
            r#"{"name": "John", "phone": 9876543210, "active": true, "tags": ["a"], "x": null}"#,
        )
        .unwrap();
        let record = payload.record();

        assert_eq!(record.get("name"), Some("John"));
        assert_eq!(record.get("phone"), Some("9876543210"));
        assert_eq!(record.get("active"), Some("true"));
        assert_eq!(record.get("tags"), None);
        assert!(record.contains("x"));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_render_unchanged_preserves_types_and_order() {
        let raw = r#"{"zeta":1,"alpha":"a","nested":{"k":[1,2]},"flag":false}"#;
        let payload = Payload::parse(raw).unwrap();

        assert_eq!(payload.render(payload.record()).unwrap(), raw);
    }

    #[test]
    fn test_render_rewrites_changed_fields_as_strings() {
        let payload = Payload::parse(r#"{"phone":9876543210,"order":42}"#).unwrap();
        let mut redacted = payload.record().clone();
        redacted.insert("phone", Some("98XXXXXX10".to_string()));

        assert_eq!(
            payload.render(&redacted).unwrap(),
            r#"{"phone":"98XXXXXX10","order":42}"#
        );
    }

    #[test]
    fn test_large_numbers_keep_their_digits() {
        let raw = r#"{"order_id":123456789012345678901234,"ratio":0.10000000000000000001,"city":"Pune"}"#;
        let payload = Payload::parse(raw).unwrap();

        assert_eq!(
            payload.record().get("order_id"),
            Some("123456789012345678901234")
        );
        assert_eq!(payload.record().get("ratio"), Some("0.10000000000000000001"));
        assert_eq!(payload.render(payload.record()).unwrap(), raw);
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(
            Payload::parse("{not json"),
            Err(GuardianError::Payload(_))
        ));

        let err = Payload::parse("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
