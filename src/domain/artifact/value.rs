// src/domain/artifact/value.rs
//
// Attribute value kinds and typed values.
//
// An attribute value lives in exactly one of five typed slots, selected
// solely by its value kind.

use serde::{Deserialize, Serialize};

/// The closed set of attribute value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Int32,
    Int64,
    Double,
    /// Unix epoch seconds
    DateTime,
}

impl ValueKind {
    pub const ALL: [ValueKind; 5] = [
        ValueKind::Text,
        ValueKind::Int32,
        ValueKind::Int64,
        ValueKind::Double,
        ValueKind::DateTime,
    ];

    /// Parses a declared value kind as it appears in external results
    pub fn parse(value_type: &str) -> Option<Self> {
        match value_type {
            "text" => Some(ValueKind::Text),
            "int32" => Some(ValueKind::Int32),
            "int64" => Some(ValueKind::Int64),
            "double" => Some(ValueKind::Double),
            "datetime" => Some(ValueKind::DateTime),
            _ => None,
        }
    }

    /// Name used in external results
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Double => "double",
            ValueKind::DateTime => "datetime",
        }
    }

    /// Label the case store records for an attribute type of this kind
    pub fn store_label(&self) -> &'static str {
        match self {
            ValueKind::Text => "String",
            ValueKind::Int32 => "Integer",
            ValueKind::Int64 => "Long",
            ValueKind::Double => "Double",
            ValueKind::DateTime => "DateTime",
        }
    }

    pub fn from_store_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.store_label() == label)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Text(String),
    Int32(i32),
    Int64(i64),
    Double(f64),
    DateTime(i64),
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Text(_) => ValueKind::Text,
            TypedValue::Int32(_) => ValueKind::Int32,
            TypedValue::Int64(_) => ValueKind::Int64,
            TypedValue::Double(_) => ValueKind::Double,
            TypedValue::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Text form used when indexing
    pub fn display_value(&self) -> String {
        match self {
            TypedValue::Text(value) => value.clone(),
            TypedValue::Int32(value) => value.to_string(),
            TypedValue::Int64(value) | TypedValue::DateTime(value) => value.to_string(),
            TypedValue::Double(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        for kind in ValueKind::ALL {
            assert_eq!(ValueKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(ValueKind::parse("Text"), None);
        assert_eq!(ValueKind::parse("INT32"), None);
        assert_eq!(ValueKind::parse("blob"), None);
    }

    #[test]
    fn test_store_labels() {
        assert_eq!(ValueKind::Text.store_label(), "String");
        assert_eq!(ValueKind::DateTime.store_label(), "DateTime");
        assert_eq!(ValueKind::from_store_label("Long"), Some(ValueKind::Int64));
        assert_eq!(ValueKind::from_store_label("long"), None);
    }

    #[test]
    fn test_value_kind_matches_slot() {
        assert_eq!(TypedValue::DateTime(0).kind(), ValueKind::DateTime);
        assert_eq!(TypedValue::Int64(0).kind(), ValueKind::Int64);
        assert_eq!(TypedValue::Text("a".into()).as_text(), Some("a"));
        assert_eq!(TypedValue::Int32(7).as_text(), None);
    }
}
