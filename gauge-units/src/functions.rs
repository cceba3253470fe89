//! Unit conversion functions for Gauge

use std::collections::HashMap;
use gauge_plugin::prelude::*;
use crate::helpers::{check_finite, extract_category, extract_number, extract_text, require_args};
use crate::{categories, convert, format_conversion, from_base, to_base, UNITS};

fn into_value(result: Result<Value, GaugeError>) -> Value {
    result.unwrap_or_else(Value::Error)
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"kilometers\" or \"km\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"miles\")"),
    ArgMeta::required("category", "Text", "Category: length, weight, temperature, volume, speed, time, energy"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"kilometers\", \"miles\", \"length\") → 0.621371",
    "convert(0, \"celsius\", \"fahrenheit\", \"temperature\") → 32",
    "convert(1, \"hours\", \"seconds\", \"time\") → 3600",
];

static CONVERT_RELATED: [&str; 3] = ["describe", "to_base", "units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another within a category",
            usage: "convert(value, from_unit, to_unit, category)",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(convert_args("convert", args).map(|(_, _, _, result)| Value::Number(result)))
    }
}

/// Shared argument handling of `convert` and `describe`
fn convert_args<'a>(func: &str, args: &'a [Value]) -> Result<(f64, &'a str, &'a str, f64), GaugeError> {
    require_args(args, func, 4)?;
    let value = extract_number(&args[0], func, "value")?;
    let from = extract_text(&args[1], func, "from_unit")?;
    let to = extract_text(&args[2], func, "to_unit")?;
    let category = extract_text(&args[3], func, "category")?;
    let result = check_finite(func, convert(value, from, to, category)?)?;
    Ok((value, from, to, result))
}

// ============ describe ============

pub struct Describe;

static DESCRIBE_ARGS: [ArgMeta; 5] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit"),
    ArgMeta::required("to_unit", "Text", "Target unit"),
    ArgMeta::required("category", "Text", "Category the units belong to"),
    ArgMeta::optional("precision", "Number", "Decimal places in the result", "2"),
];

static DESCRIBE_EXAMPLES: [&str; 3] = [
    "describe(1, \"kilometers\", \"miles\", \"length\") → \"1 kilometers is equal to 0.62 miles\"",
    "describe(100, \"celsius\", \"kelvin\", \"temperature\") → \"100 celsius is equal to 373.15 kelvin\"",
    "describe(1, \"pounds\", \"grams\", \"weight\", 0) → \"1 pounds is equal to 454 grams\"",
];

static DESCRIBE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for Describe {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "describe",
            description: "Convert a value and phrase the result as a sentence",
            usage: "describe(value, from_unit, to_unit, category, [precision])",
            args: &DESCRIBE_ARGS,
            returns: "Text",
            examples: &DESCRIBE_EXAMPLES,
            category: "units",
            related: &DESCRIBE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(convert_args("describe", args).and_then(|(value, from, to, result)| {
            let precision = match args.get(4) {
                Some(arg) => extract_precision(arg, "describe")?,
                None => ctx.precision,
            };
            Ok(Value::Text(format_conversion(value, from, result, to, precision)))
        }))
    }
}

/// Decimal places beyond this carry no information for an f64
const MAX_PRECISION: u32 = 17;

fn extract_precision(arg: &Value, func: &str) -> Result<u32, GaugeError> {
    let n = extract_number(arg, func, "precision")?;
    if n < 0.0 || n.fract() != 0.0 || n > MAX_PRECISION as f64 {
        return Err(GaugeError::domain_error(format!(
            "{}(): precision must be a whole number between 0 and {}, got {}",
            func, MAX_PRECISION, n
        )));
    }
    Ok(n as u32)
}

// ============ to_base / from_base ============

pub struct ToBase;
pub struct FromBase;

static BASE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("unit", "Text", "Unit of the value (to_base) or of the result (from_base)"),
    ArgMeta::required("category", "Text", "Category the unit belongs to"),
];

static TO_BASE_EXAMPLES: [&str; 2] = [
    "to_base(5000, \"meters\", \"length\") → 5",
    "to_base(212, \"fahrenheit\", \"temperature\") → 100",
];

static FROM_BASE_EXAMPLES: [&str; 2] = [
    "from_base(5, \"meters\", \"length\") → 5000",
    "from_base(0, \"kelvin\", \"temperature\") → 273.15",
];

static BASE_RELATED: [&str; 2] = ["convert", "base_unit"];

fn base_args<'a>(func: &str, args: &'a [Value]) -> Result<(f64, &'a str, &'a str), GaugeError> {
    require_args(args, func, 3)?;
    let value = extract_number(&args[0], func, "value")?;
    let unit = extract_text(&args[1], func, "unit")?;
    let category = extract_text(&args[2], func, "category")?;
    Ok((value, unit, category))
}

impl FunctionPlugin for ToBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_base",
            description: "Express a value in the base unit of its category",
            usage: "to_base(value, unit, category)",
            args: &BASE_ARGS,
            returns: "Number",
            examples: &TO_BASE_EXAMPLES,
            category: "units",
            related: &BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(base_args("to_base", args).and_then(|(value, unit, category)| {
            Ok(Value::Number(check_finite("to_base", to_base(value, unit, category)?)?))
        }))
    }
}

impl FunctionPlugin for FromBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "from_base",
            description: "Express a base-unit value in another unit of the category",
            usage: "from_base(value, unit, category)",
            args: &BASE_ARGS,
            returns: "Number",
            examples: &FROM_BASE_EXAMPLES,
            category: "units",
            related: &BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(base_args("from_base", args).and_then(|(value, unit, category)| {
            Ok(Value::Number(check_finite("from_base", from_base(value, unit, category)?)?))
        }))
    }
}

// ============ categories ============

pub struct Categories;

static CATEGORIES_EXAMPLES: [&str; 1] = [
    "categories() → [\"length\", \"weight\", \"temperature\", \"volume\", \"speed\", \"time\", \"energy\"]",
];

static CATEGORIES_RELATED: [&str; 2] = ["units", "base_unit"];

impl FunctionPlugin for Categories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "categories",
            description: "List the conversion categories",
            usage: "categories()",
            args: &[],
            returns: "List<Text>",
            examples: &CATEGORIES_EXAMPLES,
            category: "units",
            related: &CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(categories().into_iter().map(Value::from).collect())
    }
}

// ============ units ============

pub struct Units;

static CATEGORY_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Category name"),
];

static UNITS_EXAMPLES: [&str; 1] = [
    "units(\"time\") → [{name: \"seconds\", symbol: \"s\", base: true}, ...]",
];

static UNITS_RELATED: [&str; 2] = ["categories", "base_unit"];

impl FunctionPlugin for Units {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "units",
            description: "List the units of a category, base unit first",
            usage: "units(category)",
            args: &CATEGORY_ARGS,
            returns: "List<Object {name, symbol, base}>",
            examples: &UNITS_EXAMPLES,
            category: "units",
            related: &UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(require_args(args, "units", 1)
            .and_then(|_| extract_category(&args[0], "units"))
            .map(|category| {
                Value::List(UNITS.units(category).iter().map(|unit| {
                    let mut obj = HashMap::new();
                    obj.insert("name".to_string(), Value::from(unit.name));
                    obj.insert("symbol".to_string(), Value::from(unit.symbol));
                    obj.insert("base".to_string(), Value::Bool(UNITS.is_base(unit)));
                    Value::Object(obj)
                }).collect())
            }))
    }
}

// ============ base_unit ============

pub struct BaseUnit;

static BASE_UNIT_EXAMPLES: [&str; 2] = [
    "base_unit(\"length\") → \"kilometers\"",
    "base_unit(\"temperature\") → \"celsius\"",
];

static BASE_UNIT_RELATED: [&str; 2] = ["to_base", "units"];

impl FunctionPlugin for BaseUnit {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "base_unit",
            description: "Name the base unit of a category",
            usage: "base_unit(category)",
            args: &CATEGORY_ARGS,
            returns: "Text",
            examples: &BASE_UNIT_EXAMPLES,
            category: "units",
            related: &BASE_UNIT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(require_args(args, "base_unit", 1)
            .and_then(|_| extract_category(&args[0], "base_unit"))
            .map(|category| Value::from(UNITS.base_unit(category).name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_ctx() -> EvalContext {
        EvalContext::new()
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_convert_length() {
        let args = vec![Value::Number(1.0), text("km"), text("m"), text("length")];
        let result = Convert.call(&args, &eval_ctx());
        let value = result.as_number().unwrap();
        assert!((value - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_temperature() {
        let args = vec![Value::Number(0.0), text("celsius"), text("fahrenheit"), text("temperature")];
        assert_eq!(Convert.call(&args, &eval_ctx()).as_number(), Some(32.0));
    }

    #[test]
    fn test_convert_overflow_is_domain_error() {
        let args = vec![Value::Number(f64::MAX), text("kilometers"), text("millimeters"), text("length")];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::DOMAIN_ERROR));
        assert!(Describe.call(&args, &eval_ctx()).is_error());
    }

    #[test]
    fn test_to_base_overflow_is_domain_error() {
        let args = vec![Value::Number(f64::MAX), text("days"), text("time")];
        let result = ToBase.call(&args, &eval_ctx());
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::DOMAIN_ERROR));
    }

    #[test]
    fn test_to_base_unknown_category() {
        let args = vec![Value::Number(1.0), text("meters"), text("luminosity")];
        let result = ToBase.call(&args, &eval_ctx());
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_convert_accepts_numeric_text() {
        let args = vec![text("1"), text("hours"), text("seconds"), text("time")];
        assert_eq!(Convert.call(&args, &eval_ctx()).as_number(), Some(3600.0));
    }

    #[test]
    fn test_convert_arg_count() {
        let result = Convert.call(&[Value::Number(1.0)], &eval_ctx());
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::ARG_COUNT));
    }

    #[test]
    fn test_convert_unknown_unit() {
        let args = vec![Value::Number(1.0), text("parsecs"), text("meters"), text("length")];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::UNKNOWN_UNIT));
    }

    #[test]
    fn test_convert_unknown_category() {
        let args = vec![Value::Number(1.0), text("x"), text("y"), text("luminosity")];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_describe_uses_context_precision() {
        let args = vec![Value::Number(1.0), text("kilometers"), text("miles"), text("length")];
        let result = Describe.call(&args, &eval_ctx());
        assert_eq!(result.as_text(), Some("1 kilometers is equal to 0.62 miles"));

        let precise = eval_ctx().with_precision(4);
        let result = Describe.call(&args, &precise);
        assert_eq!(result.as_text(), Some("1 kilometers is equal to 0.6214 miles"));
    }

    #[test]
    fn test_describe_explicit_precision() {
        let args = vec![
            Value::Number(1.0), text("pounds"), text("grams"), text("weight"), Value::Number(0.0),
        ];
        assert_eq!(Describe.call(&args, &eval_ctx()).as_text(), Some("1 pounds is equal to 454 grams"));

        let mut bad = args.clone();
        bad[4] = Value::Number(2.5);
        let err = Describe.call(&bad, &eval_ctx());
        assert_eq!(err.as_error().map(|e| e.code.as_str()), Some(codes::DOMAIN_ERROR));
    }

    #[test]
    fn test_to_base() {
        let args = vec![Value::Number(5000.0), text("meters"), text("length")];
        let value = ToBase.call(&args, &eval_ctx()).as_number().unwrap();
        assert!((value - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_base() {
        let args = vec![Value::Number(0.0), text("kelvin"), text("temperature")];
        assert_eq!(FromBase.call(&args, &eval_ctx()).as_number(), Some(273.15));
    }

    #[test]
    fn test_categories() {
        let result = Categories.call(&[], &eval_ctx());
        let list = result.as_list().unwrap();
        assert_eq!(list.len(), 7);
        assert_eq!(list[2].as_text(), Some("temperature"));
    }

    #[test]
    fn test_units_marks_base() {
        let result = Units.call(&[text("weight")], &eval_ctx());
        let list = result.as_list().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0].get("name").as_text(), Some("kilograms"));
        assert_eq!(list[0].get("base").as_bool(), Some(true));
        assert_eq!(list[3].get("symbol").as_text(), Some("lb"));
        assert_eq!(list[3].get("base").as_bool(), Some(false));
    }

    #[test]
    fn test_base_unit() {
        let result = BaseUnit.call(&[text("speed")], &eval_ctx());
        assert_eq!(result.as_text(), Some("meters_per_second"));
        assert!(BaseUnit.call(&[], &eval_ctx()).is_error());
    }
}
