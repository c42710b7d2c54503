//! Wire types for the classification endpoint.
//!
//! ```text
//! request:  {"document": "<base64>", "additional_labels": ["Invoice", ...]}
//! response: {"labels": ["Invoice", ...], "metadata": {...}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body POSTed to the classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Standard (padded) base64 of the document's raw bytes.
    pub document: String,

    /// Caller-supplied label hints. Always serialised, as `[]` when empty.
    pub additional_labels: Vec<String>,
}

/// Decoded body of a 200 response.
///
/// Both fields are kept as raw JSON and never validated: the service owns
/// their shape. A missing or `null` field is `None`. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub labels: Option<Value>,

    #[serde(default)]
    pub metadata: Option<Value>,
}

impl ClassificationResult {
    /// Build a result from any JSON body.
    ///
    /// Only a JSON object can carry `labels` or `metadata`; any other value
    /// yields an empty result.
    pub fn from_json(body: Value) -> Self {
        let Value::Object(mut map) = body else {
            return Self::default();
        };
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        Self {
            labels: take("labels"),
            metadata: take("metadata"),
        }
    }

    /// The string entries of `labels`, in order. Non-string entries, or a
    /// `labels` value that is not an array, are skipped.
    pub fn labels(&self) -> Vec<&str> {
        match &self.labels {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Metadata, or JSON `null` when the service sent none.
    pub fn metadata(&self) -> &Value {
        self.metadata.as_ref().unwrap_or(&Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_labels_serialise_as_array() {
        let req = ClassificationRequest {
            document: "JVBERi0=".into(),
            additional_labels: vec![],
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({"document": "JVBERi0=", "additional_labels": []}));
    }

    #[test]
    fn decodes_full_response() {
        let r = ClassificationResult::from_json(json!({"labels": ["Invoice"], "metadata": {"pages": 3}}));
        assert_eq!(r.labels(), vec!["Invoice"]);
        assert_eq!(r.metadata(), &json!({"pages": 3}));
    }

    #[test]
    fn missing_and_null_fields_decode_to_none() {
        let r = ClassificationResult::from_json(json!({}));
        assert!(r.labels.is_none());
        assert!(r.metadata.is_none());
        assert!(r.labels().is_empty());
        assert!(r.metadata().is_null());

        let r = ClassificationResult::from_json(json!({"labels": null, "metadata": null, "extra": 1}));
        assert_eq!(r, ClassificationResult::default());
    }

    #[test]
    fn label_and_metadata_shapes_are_not_validated() {
        let r = ClassificationResult::from_json(json!({
            "labels": [{"name": "Invoice", "score": 0.9}, "Contract", 7],
            "metadata": "x"
        }));
        assert_eq!(r.labels.as_ref().unwrap()[0]["name"], json!("Invoice"));
        assert_eq!(r.labels(), vec!["Contract"]);
        assert_eq!(r.metadata(), &json!("x"));

        let r = ClassificationResult::from_json(json!({"labels": "Invoice"}));
        assert!(r.labels().is_empty());
        assert_eq!(r.labels, Some(json!("Invoice")));
    }

    #[test]
    fn non_object_body_is_empty_result() {
        assert_eq!(ClassificationResult::from_json(json!([1, 2])), ClassificationResult::default());
        assert_eq!(ClassificationResult::from_json(json!("ok")), ClassificationResult::default());
    }
}
