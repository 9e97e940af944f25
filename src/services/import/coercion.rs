// src/services/import/coercion.rs
//
// Attribute value coercion
//
// Turns a declared (value type, raw string) pair into a TypedValue.
// Numbers are parsed strictly: no trimming, no locale handling.
// Doubles must be finite. Datetimes are epoch seconds and get no calendar
// validation.

use thiserror::Error;

use crate::domain::{TypedValue, ValueKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("Unsupported value type: {0}")]
    UnsupportedValueKind(String),

    #[error("Value {raw} is not a valid {kind}: {reason}")]
    Malformed {
        kind: ValueKind,
        raw: String,
        reason: String,
    },
}

pub fn coerce(value_type: &str, raw: &str) -> Result<TypedValue, CoercionError> {
    let kind = ValueKind::parse(value_type)
        .ok_or_else(|| CoercionError::UnsupportedValueKind(value_type.to_string()))?;
    coerce_kind(kind, raw)
}

pub fn coerce_kind(kind: ValueKind, raw: &str) -> Result<TypedValue, CoercionError> {
    let malformed = |reason: String| CoercionError::Malformed {
        kind,
        raw: raw.to_string(),
        reason,
    };

    match kind {
        ValueKind::Text => Ok(TypedValue::Text(raw.to_string())),
        ValueKind::Int32 => raw
            .parse::<i32>()
            .map(TypedValue::Int32)
            .map_err(|e| malformed(e.to_string())),
        ValueKind::Int64 => raw
            .parse::<i64>()
            .map(TypedValue::Int64)
            .map_err(|e| malformed(e.to_string())),
        ValueKind::Double => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(TypedValue::Double(value)),
            Ok(_) => Err(malformed("not a finite number".to_string())),
            Err(e) => Err(malformed(e.to_string())),
        },
        ValueKind::DateTime => raw
            .parse::<i64>()
            .map(TypedValue::DateTime)
            .map_err(|e| malformed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_verbatim() {
        assert_eq!(coerce("text", "  hello "), Ok(TypedValue::Text("  hello ".to_string())));
        assert_eq!(coerce("text", ""), Ok(TypedValue::Text(String::new())));
    }

    #[test]
    fn test_integers() {
        assert_eq!(coerce("int32", "-2147483648"), Ok(TypedValue::Int32(i32::MIN)));
        assert_eq!(coerce("int64", "9223372036854775807"), Ok(TypedValue::Int64(i64::MAX)));
        assert_eq!(coerce("datetime", "1400000000"), Ok(TypedValue::DateTime(1_400_000_000)));
    }

    #[test]
    fn test_int32_overflow_is_malformed() {
        let result = coerce("int32", "2147483648");
        assert!(matches!(result, Err(CoercionError::Malformed { kind: ValueKind::Int32, .. })));
    }

    #[test]
    fn test_not_a_number() {
        let error = coerce("int32", "not-a-number").unwrap_err();

        match &error {
            CoercionError::Malformed { raw, .. } => assert_eq!(raw, "not-a-number"),
            other => panic!("expected Malformed, got {:?}", other),
        }
        assert!(error.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_double() {
        assert_eq!(coerce("double", "2.5"), Ok(TypedValue::Double(2.5)));
        assert_eq!(coerce("double", "-1e3"), Ok(TypedValue::Double(-1000.0)));
        assert!(coerce("double", "two").is_err());
    }

    #[test]
    fn test_non_finite_double_is_malformed() {
        for raw in ["NaN", "nan", "inf", "-infinity"] {
            assert!(
                matches!(coerce("double", raw), Err(CoercionError::Malformed { kind: ValueKind::Double, .. })),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_datetime_is_not_a_calendar_string() {
        assert!(coerce("datetime", "2014-05-13T10:00:00Z").is_err());
    }

    #[test]
    fn test_unsupported_kind() {
        assert_eq!(
            coerce("blob", "00ff"),
            Err(CoercionError::UnsupportedValueKind("blob".to_string()))
        );
    }
}
