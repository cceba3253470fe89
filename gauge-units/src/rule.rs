//! Conversion rules relative to a category's base unit

use std::fmt;

/// How a unit relates to the base unit of its category
#[derive(Clone, Copy)]
pub enum ConversionRule {
    /// `base = value * factor`, `value = base / factor`
    Scale(f64),
    /// Pair of functions for units that need an offset (temperature)
    Affine {
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    },
}

impl ConversionRule {
    /// The rule of a base unit with a scale factor
    pub const UNIT: ConversionRule = ConversionRule::Scale(1.0);

    /// Convert a value in this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        match self {
            ConversionRule::Scale(factor) => value * factor,
            ConversionRule::Affine { to_base, .. } => to_base(value),
        }
    }

    /// Convert a value in the base unit to this unit
    pub fn from_base(&self, base_value: f64) -> f64 {
        match self {
            ConversionRule::Scale(factor) => base_value / factor,
            ConversionRule::Affine { from_base, .. } => from_base(base_value),
        }
    }

    /// Scale factor, if this is a proportional rule
    pub fn factor(&self) -> Option<f64> {
        match self {
            ConversionRule::Scale(factor) => Some(*factor),
            ConversionRule::Affine { .. } => None,
        }
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, ConversionRule::Affine { .. })
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionRule::Scale(factor) => f.debug_tuple("Scale").field(factor).finish(),
            ConversionRule::Affine { .. } => f.write_str("Affine"),
        }
    }
}
