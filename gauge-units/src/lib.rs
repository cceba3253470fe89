//! Gauge Units - Table-driven unit conversion
//!
//! Converts numeric values between units of the same category. Every unit
//! is defined relative to its category's base unit; a conversion normalizes
//! to the base and denormalizes to the target.
//!
//! Categories (base unit first):
//! - Length (kilometers, meters, centimeters, millimeters, miles, yards, inches)
//! - Weight (kilograms, grams, milligrams, pounds, ounces)
//! - Temperature (celsius, fahrenheit, kelvin)
//! - Volume (liters, milliliters, gallons, cups, pints)
//! - Speed (meters_per_second, kilometers_per_hour, miles_per_hour, feet_per_second)
//! - Time (seconds, minutes, hours, days)
//! - Energy (joules, kilojoules, calories, kilocalories)

mod category;
mod rule;
mod unit;
mod units;
mod convert;
mod helpers;
mod functions;

pub use category::Category;
pub use rule::ConversionRule;
pub use unit::{UnitDef, ConversionError};
pub use units::{UnitTable, UNITS};
pub use convert::{convert, convert_in, to_base, from_base, categories, format_conversion};

use gauge_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (4 functions)
        .with_function(functions::Convert)
        .with_function(functions::Describe)
        .with_function(functions::ToBase)
        .with_function(functions::FromBase)

        // Table queries (3 functions)
        .with_function(functions::Categories)
        .with_function(functions::Units)
        .with_function(functions::BaseUnit)
}

/// A registry holding only the unit functions
pub fn units_registry() -> PluginRegistry {
    load_units_library(PluginRegistry::new())
}
