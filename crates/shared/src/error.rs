use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure body of the panel backend: `{"detail": ...}`.
///
/// `detail` is a plain message for handled errors (404 and friends) and a
/// list of validation items for rejected query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ValidationItem>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationItem {
    #[serde(default)]
    pub loc: Vec<Value>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ErrorBody {
    /// Human-readable text carried by `detail`, if any non-blank text exists.
    pub fn detail_message(&self) -> Option<String> {
        let text = match self.detail.as_ref()? {
            ErrorDetail::Message(message) => message.trim().to_string(),
            ErrorDetail::Items(items) => items
                .iter()
                .filter_map(|item| item.msg.as_deref())
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            ErrorDetail::Other(Value::Null) => String::new(),
            ErrorDetail::Other(other) => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_detail_is_used_verbatim() {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Operadora não encontrada"})).expect("decode");
        assert_eq!(
            body.detail_message().as_deref(),
            Some("Operadora não encontrada")
        );
    }

    #[test]
    fn validation_items_are_joined() {
        let body: ErrorBody = serde_json::from_value(json!({
            "detail": [
                {"loc": ["query", "limit"], "msg": "Input should be less than or equal to 100", "type": "less_than_equal"},
                {"loc": ["query", "page"], "msg": "Input should be greater than or equal to 1", "type": "greater_than_equal"}
            ]
        }))
        .expect("decode");
        assert_eq!(
            body.detail_message().as_deref(),
            Some("Input should be less than or equal to 100; Input should be greater than or equal to 1")
        );
    }

    #[test]
    fn blank_or_missing_detail_yields_nothing() {
        let blank: ErrorBody = serde_json::from_value(json!({"detail": "   "})).expect("decode");
        let missing: ErrorBody = serde_json::from_value(json!({"error": "x"})).expect("decode");
        let null: ErrorBody = serde_json::from_value(json!({"detail": null})).expect("decode");
        assert_eq!(blank.detail_message(), None);
        assert_eq!(missing.detail_message(), None);
        assert_eq!(null.detail_message(), None);
    }
}
