//! Unit definitions and conversion errors

use std::fmt;
use thiserror::Error;
use crate::{Category, ConversionRule};

/// A unit registered under one category
#[derive(Debug, Clone)]
pub struct UnitDef {
    /// Canonical name, the lookup key (e.g. "kilometers")
    pub name: &'static str,
    /// Short symbol (e.g. "km")
    pub symbol: &'static str,
    pub category: Category,
    pub rule: ConversionRule,
    /// Extra spellings accepted on lookup
    pub aliases: &'static [&'static str],
}

impl UnitDef {
    pub const fn scale(
        name: &'static str,
        symbol: &'static str,
        category: Category,
        factor: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        UnitDef { name, symbol, category, rule: ConversionRule::Scale(factor), aliases }
    }

    pub const fn affine(
        name: &'static str,
        symbol: &'static str,
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
        aliases: &'static [&'static str],
    ) -> Self {
        UnitDef {
            name,
            symbol,
            category: Category::Temperature,
            rule: ConversionRule::Affine { to_base, from_base },
            aliases,
        }
    }

    /// Every spelling this unit answers to
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        [self.name, self.symbol].into_iter().chain(self.aliases.iter().copied())
    }

    pub fn to_base(&self, value: f64) -> f64 {
        self.rule.to_base(value)
    }

    pub fn from_base(&self, base_value: f64) -> f64 {
        self.rule.from_base(base_value)
    }
}

impl PartialEq for UnitDef {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.name == other.name
    }
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown unit '{unit}' in category {category}")]
    UnknownUnit { unit: String, category: Category },
}
