//! Raw metadata values as loaded from a metadata source.
//!
//! A metadata source is a mapping from meta key to a loosely typed value:
//! a scalar, a sequence, or a nested mapping (language tags, resource
//! names). Insertion order of mappings is significant: keys that are not
//! pinned by the resolved ordering keep their source order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A metadata source or override mapping, in insertion order.
pub type MetaSource = IndexMap<String, MetaValue>;

/// A single raw metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MetaValue>),
    Map(IndexMap<String, MetaValue>),
}

impl MetaValue {
    /// True for values the rules treat as absent: null, `false`, zero,
    /// and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            MetaValue::Null => true,
            MetaValue::Bool(b) => !b,
            MetaValue::Number(n) => *n == 0.0,
            MetaValue::String(s) => s.is_empty(),
            MetaValue::Array(_) | MetaValue::Map(_) => false,
        }
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_falsy()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, MetaValue>> {
        match self {
            MetaValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(values: Vec<T>) -> Self {
        MetaValue::Array(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        assert!(MetaValue::Null.is_falsy());
        assert!(MetaValue::Bool(false).is_falsy());
        assert!(MetaValue::Number(0.0).is_falsy());
        assert!(MetaValue::from("").is_falsy());

        assert!(MetaValue::from("x").is_truthy());
        assert!(MetaValue::Array(vec![]).is_truthy());
        assert!(MetaValue::Map(IndexMap::new()).is_truthy());
    }

    #[test]
    fn deserializes_untagged() {
        let source: MetaSource = serde_json::from_str(
            r#"{
                "name": {"default": "test", "en": "test"},
                "noframes": true,
                "match": ["*://*"],
                "version": "1.0.0"
            }"#,
        )
        .expect("deserialize source");

        assert!(matches!(source["name"], MetaValue::Map(_)));
        assert_eq!(source["noframes"], MetaValue::Bool(true));
        assert_eq!(source["match"], MetaValue::from(vec!["*://*"]));
        assert_eq!(source["version"].as_str(), Some("1.0.0"));
    }

    #[test]
    fn source_preserves_insertion_order() {
        let source: MetaSource =
            serde_json::from_str(r#"{"zebra": "1", "alpha": "2", "mid": "3"}"#)
                .expect("deserialize source");
        let keys: Vec<&String> = source.keys().collect();
        assert_eq!(keys, ["zebra", "alpha", "mid"]);
    }
}
