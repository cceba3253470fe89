//! Conversion between units of one category
//!
//! Every conversion goes through the category's base unit: the source rule
//! normalizes the value to the base, the target rule denormalizes it. The
//! table therefore needs one rule per unit rather than one per unit pair.

use tracing::trace;
use crate::{Category, ConversionError, UNITS};

/// Convert `value` from `from_unit` to `to_unit` within the named category.
///
/// Fails with [`ConversionError::UnknownCategory`] before any unit is looked
/// up, then with [`ConversionError::UnknownUnit`] for the first unit (source,
/// then target) that is not registered under the category.
pub fn convert(value: f64, from_unit: &str, to_unit: &str, category: &str) -> Result<f64, ConversionError> {
    let category: Category = category.parse()?;
    convert_in(value, from_unit, to_unit, category)
}

/// Convert within an already-resolved category
pub fn convert_in(value: f64, from_unit: &str, to_unit: &str, category: Category) -> Result<f64, ConversionError> {
    let from = UNITS.lookup(category, from_unit)?;
    let to = UNITS.lookup(category, to_unit)?;

    // Same unit: skip the two redundant operations so the value comes back untouched
    if from == to {
        return Ok(value);
    }

    let base_value = from.to_base(value);
    let result = to.from_base(base_value);
    trace!(%category, from = from.name, to = to.name, value, base_value, result, "converted");
    Ok(result)
}

/// Express `value` (in `unit`) in the category's base unit
pub fn to_base(value: f64, unit: &str, category: &str) -> Result<f64, ConversionError> {
    let category: Category = category.parse()?;
    Ok(UNITS.lookup(category, unit)?.to_base(value))
}

/// Express a base-unit `value` in `unit`
pub fn from_base(value: f64, unit: &str, category: &str) -> Result<f64, ConversionError> {
    let category: Category = category.parse()?;
    Ok(UNITS.lookup(category, unit)?.from_base(value))
}

/// Names of all categories, in table order
pub fn categories() -> Vec<&'static str> {
    Category::names()
}

/// Human-readable sentence for a finished conversion,
/// e.g. `1 kilometers is equal to 0.62 miles`
pub fn format_conversion(value: f64, from_unit: &str, result: f64, to_unit: &str, precision: u32) -> String {
    format!(
        "{} {} is equal to {:.*} {}",
        value, from_unit, precision as usize, result, to_unit
    )
}
