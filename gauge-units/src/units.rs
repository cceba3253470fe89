//! Unit definitions organized by category
//!
//! Each category holds one rule per unit, all relative to the category's
//! base unit, so converting between any two units takes two table lookups.

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;
use crate::{Category, ConversionError, UnitDef};

/// Global unit table
pub static UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::new);

/// Units of a single category
#[derive(Debug, Default)]
struct CategoryTable {
    units: Vec<UnitDef>,
    /// Lower-cased name, symbol or alias -> position in `units`
    index: HashMap<String, usize>,
}

/// Registry of all known units, keyed by category
#[derive(Debug)]
pub struct UnitTable {
    tables: [CategoryTable; 7],
}

impl UnitTable {
    pub fn new() -> Self {
        let mut table = UnitTable {
            tables: Default::default(),
        };
        table.register_all_units();
        debug!(units = table.len(), categories = Category::ALL.len(), "unit table built");
        table
    }

    /// Look up a unit by name, symbol or alias within a category
    pub fn lookup(&self, category: Category, unit: &str) -> Result<&UnitDef, ConversionError> {
        let table = self.table(category);
        table.index
            .get(&normalize(unit))
            .map(|&i| &table.units[i])
            .ok_or_else(|| ConversionError::UnknownUnit {
                unit: unit.to_string(),
                category,
            })
    }

    /// Units of a category, in registration order (base unit first)
    pub fn units(&self, category: Category) -> &[UnitDef] {
        &self.table(category).units
    }

    /// Canonical unit names of a category, in registration order
    pub fn unit_names(&self, category: Category) -> Vec<&'static str> {
        self.units(category).iter().map(|u| u.name).collect()
    }

    /// The base unit every rule of the category is defined against
    pub fn base_unit(&self, category: Category) -> &UnitDef {
        &self.table(category).units[0]
    }

    pub fn is_base(&self, unit: &UnitDef) -> bool {
        self.base_unit(unit.category) == unit
    }

    /// Total number of units across all categories
    pub fn len(&self) -> usize {
        self.tables.iter().map(|t| t.units.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self, category: Category) -> &CategoryTable {
        &self.tables[category as usize]
    }

    fn register(&mut self, unit: UnitDef) {
        let table = &mut self.tables[unit.category as usize];
        let position = table.units.len();
        for key in unit.keys() {
            let previous = table.index.insert(normalize(key), position);
            debug_assert!(previous.is_none(), "duplicate unit key '{}' in {}", key, unit.category);
        }
        debug_assert!(
            unit.rule.factor().is_none_or(|f| f.is_finite() && f != 0.0),
            "unit {} has an unusable factor",
            unit.name
        );
        table.units.push(unit);
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_weight_units();
        self.register_temperature_units();
        self.register_volume_units();
        self.register_speed_units();
        self.register_time_units();
        self.register_energy_units();
    }

    // Factors are base units per one of the unit. The base unit is registered first.

    fn register_length_units(&mut self) {
        use Category::Length;
        self.register(UnitDef::scale("kilometers", "km", Length, 1.0, &["kilometer", "kilometre", "kilometres"]));
        self.register(UnitDef::scale("meters", "m", Length, 0.001, &["meter", "metre", "metres"]));
        self.register(UnitDef::scale("centimeters", "cm", Length, 0.00001, &["centimeter", "centimetre", "centimetres"]));
        self.register(UnitDef::scale("millimeters", "mm", Length, 0.000001, &["millimeter", "millimetre", "millimetres"]));
        self.register(UnitDef::scale("miles", "mi", Length, 1.609344, &["mile"]));
        self.register(UnitDef::scale("yards", "yd", Length, 0.0009144, &["yard"]));
        self.register(UnitDef::scale("inches", "in", Length, 0.0000254, &["inch"]));
    }

    fn register_weight_units(&mut self) {
        use Category::Weight;
        self.register(UnitDef::scale("kilograms", "kg", Weight, 1.0, &["kilogram", "kilo", "kilos"]));
        self.register(UnitDef::scale("grams", "g", Weight, 0.001, &["gram"]));
        self.register(UnitDef::scale("milligrams", "mg", Weight, 0.000001, &["milligram"]));
        self.register(UnitDef::scale("pounds", "lb", Weight, 0.45359237, &["pound", "lbs"]));
        self.register(UnitDef::scale("ounces", "oz", Weight, 0.028349523125, &["ounce"]));
    }

    fn register_temperature_units(&mut self) {
        self.register(UnitDef::affine("celsius", "°C", identity, identity, &["c", "degc", "centigrade"]));
        self.register(UnitDef::affine("fahrenheit", "°F", fahrenheit_to_celsius, celsius_to_fahrenheit, &["f", "degf"]));
        self.register(UnitDef::affine("kelvin", "K", kelvin_to_celsius, celsius_to_kelvin, &["kelvins"]));
    }

    fn register_volume_units(&mut self) {
        use Category::Volume;
        self.register(UnitDef::scale("liters", "L", Volume, 1.0, &["liter", "litre", "litres"]));
        self.register(UnitDef::scale("milliliters", "mL", Volume, 0.001, &["milliliter", "millilitre", "millilitres"]));
        self.register(UnitDef::scale("gallons", "gal", Volume, 3.785411784, &["gallon"]));
        self.register(UnitDef::scale("cups", "cup", Volume, 0.2365882365, &[]));
        self.register(UnitDef::scale("pints", "pt", Volume, 0.473176473, &["pint"]));
    }

    fn register_speed_units(&mut self) {
        use Category::Speed;
        self.register(UnitDef::scale("meters_per_second", "m/s", Speed, 1.0, &["mps", "meters per second"]));
        self.register(UnitDef::scale("kilometers_per_hour", "km/h", Speed, 1.0 / 3.6, &["kph", "kmh", "kilometers per hour"]));
        self.register(UnitDef::scale("miles_per_hour", "mph", Speed, 0.44704, &["mi/h", "miles per hour"]));
        self.register(UnitDef::scale("feet_per_second", "ft/s", Speed, 0.3048, &["fps", "feet per second"]));
    }

    fn register_time_units(&mut self) {
        use Category::Time;
        self.register(UnitDef::scale("seconds", "s", Time, 1.0, &["second", "sec", "secs"]));
        self.register(UnitDef::scale("minutes", "min", Time, 60.0, &["minute", "mins"]));
        self.register(UnitDef::scale("hours", "h", Time, 3600.0, &["hour", "hr", "hrs"]));
        self.register(UnitDef::scale("days", "d", Time, 86400.0, &["day"]));
    }

    fn register_energy_units(&mut self) {
        use Category::Energy;
        self.register(UnitDef::scale("joules", "J", Energy, 1.0, &["joule"]));
        self.register(UnitDef::scale("kilojoules", "kJ", Energy, 1000.0, &["kilojoule"]));
        self.register(UnitDef::scale("calories", "cal", Energy, 4.184, &["calorie"]));
        self.register(UnitDef::scale("kilocalories", "kcal", Energy, 4184.0, &["kilocalorie", "food calories"]));
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

fn identity(value: f64) -> f64 {
    value
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}
