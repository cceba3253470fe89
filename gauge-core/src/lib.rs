//! Gauge Core - Fundamental types
//!
//! This crate provides the core types used throughout Gauge:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `GaugeError`: Structured errors for tool consumers

mod value;
mod error;

pub use value::Value;
pub use error::{GaugeError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, GaugeError, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod value_tests {
        use super::*;
        use pretty_assertions::assert_eq;
        use serde_json::json;

        #[test]
        fn test_from_i64() {
            let v: Value = 42i64.into();
            assert_eq!(v.as_number(), Some(42.0));
        }

        #[test]
        fn test_from_str() {
            let v: Value = "hello".into();
            assert!(matches!(v, Value::Text(_)));
            assert_eq!(v.as_text(), Some("hello"));
        }

        #[test]
        fn test_type_name() {
            assert_eq!(Value::Number(0.0).type_name(), "Number");
            assert_eq!(Value::Text(String::new()).type_name(), "Text");
            assert_eq!(Value::Bool(true).type_name(), "Bool");
            assert_eq!(Value::Null.type_name(), "Null");
        }

        #[test]
        fn test_is_error() {
            let err = Value::Error(GaugeError::domain_error("nope"));
            assert!(err.is_error());
            assert!(!Value::Null.is_error());
        }

        #[test]
        fn test_to_number_from_text() {
            assert_eq!(Value::Text(" 2.5 ".to_string()).to_number(), Value::Number(2.5));
            assert!(Value::Text("abc".to_string()).to_number().is_error());
        }

        #[test]
        fn test_get_missing_field() {
            let obj = Value::Object(std::collections::HashMap::new());
            let missing = obj.get("name");
            assert_eq!(missing.as_error().map(|e| e.code.as_str()), Some(codes::NOT_FOUND));
        }

        #[test]
        fn test_json_bridge() {
            let json = json!({"name": "meters", "factor": 0.001, "base": false});
            let value = Value::from_json(&json);
            assert_eq!(value.get("factor").as_number(), Some(0.001));
            assert_eq!(value.to_json(), json);
        }

        #[test]
        fn test_non_finite_to_json_is_null() {
            assert_eq!(Value::Number(f64::NAN).to_json(), serde_json::Value::Null);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = GaugeError::arg_count("convert", 4, 2);
            assert_eq!(err.code, codes::ARG_COUNT);
            assert!(err.suggestion.is_some());
        }

        #[test]
        fn test_unknown_unit_lists_valid_units() {
            let err = GaugeError::unknown_unit("parsecs", "length", &["kilometers", "meters"]);
            assert_eq!(err.code, codes::UNKNOWN_UNIT);
            assert_eq!(err.suggestion.as_deref(), Some("Valid length units: kilometers, meters"));
        }

        #[test]
        fn test_internal_is_fatal() {
            assert_eq!(GaugeError::internal("boom").severity, Severity::Fatal);
        }

        #[test]
        fn test_error_display() {
            let err = GaugeError::parse_error("unexpected token");
            let display = format!("{}", err);
            assert!(display.contains("PARSE_ERROR"));
        }

        #[test]
        fn test_error_serializes_without_empty_suggestion() {
            let err = GaugeError::new(codes::NOT_FOUND, "missing");
            let json = serde_json::to_value(&err).unwrap();
            assert!(json.get("suggestion").is_none());
            assert_eq!(json["severity"], "error");
        }
    }
}
