//! Argument extraction shared by the unit functions

use gauge_core::{GaugeError, Value};
use crate::{Category, ConversionError, UNITS};

impl From<ConversionError> for GaugeError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCategory(name) => {
                GaugeError::unknown_category(&name, &Category::names())
            }
            ConversionError::UnknownUnit { unit, category } => {
                GaugeError::unknown_unit(&unit, category.name(), &UNITS.unit_names(category))
            }
        }
    }
}

/// Extract a finite number. Numeric text is accepted.
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, GaugeError> {
    let n = match value {
        Value::Number(n) => *n,
        Value::Text(s) => s.trim().parse::<f64>()
            .map_err(|_| GaugeError::arg_type(func, arg, "Number", "Text"))?,
        Value::Error(e) => return Err(e.clone()),
        other => return Err(GaugeError::arg_type(func, arg, "Number", other.type_name())),
    };
    if !n.is_finite() {
        return Err(GaugeError::domain_error(format!("{}(): {} must be finite, got {}", func, arg, n)));
    }
    Ok(n)
}

/// Reject a computed result that overflowed the f64 range
pub fn check_finite(func: &str, result: f64) -> Result<f64, GaugeError> {
    if !result.is_finite() {
        return Err(GaugeError::domain_error(format!("{}(): result is out of range", func)));
    }
    Ok(result)
}

/// Extract a Text string from a Value
pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, GaugeError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(GaugeError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Extract and resolve a category name
pub fn extract_category(value: &Value, func: &str) -> Result<Category, GaugeError> {
    let name = extract_text(value, func, "category")?;
    Ok(name.parse::<Category>()?)
}

/// Fail with ARG_COUNT unless at least `expected` arguments were supplied
pub fn require_args(args: &[Value], func: &str, expected: usize) -> Result<(), GaugeError> {
    if args.len() < expected {
        return Err(GaugeError::arg_count(func, expected, args.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::codes;

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number(&Value::Number(42.0), "test", "arg"), Ok(42.0));
        assert_eq!(extract_number(&Value::Text("1.5".into()), "test", "arg"), Ok(1.5));
    }

    #[test]
    fn test_extract_number_rejects_non_finite() {
        let err = extract_number(&Value::Number(f64::INFINITY), "convert", "value").unwrap_err();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_extract_number_rejects_bool() {
        let err = extract_number(&Value::Bool(true), "convert", "value").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(check_finite("convert", 1.5), Ok(1.5));
        let err = check_finite("convert", f64::INFINITY).unwrap_err();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
        assert_eq!(err.message, "Domain error: convert(): result is out of range");
    }

    #[test]
    fn test_extract_text() {
        let val = Value::Text("hello".to_string());
        assert_eq!(extract_text(&val, "test", "arg"), Ok("hello"));
        assert!(extract_text(&Value::Null, "test", "arg").is_err());
    }

    #[test]
    fn test_extract_category() {
        assert_eq!(extract_category(&Value::Text("Weight".into()), "units"), Ok(Category::Weight));
        let err = extract_category(&Value::Text("luminosity".into()), "units").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_CATEGORY);
        assert!(err.suggestion.unwrap().contains("temperature"));
    }

    #[test]
    fn test_unknown_unit_error_lists_category_units() {
        let err: GaugeError = ConversionError::UnknownUnit {
            unit: "parsecs".into(),
            category: Category::Time,
        }.into();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert_eq!(err.suggestion.as_deref(), Some("Valid time units: seconds, minutes, hours, days"));
    }

    #[test]
    fn test_require_args() {
        assert!(require_args(&[Value::Null], "f", 1).is_ok());
        assert_eq!(require_args(&[], "f", 2).unwrap_err().code, codes::ARG_COUNT);
    }
}
