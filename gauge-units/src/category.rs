//! Conversion categories
//!
//! A category is a family of mutually convertible units. The set is fixed
//! at build time; every lookup in the unit table is scoped to one category.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Volume,
    Speed,
    Time,
    Energy,
}

impl Category {
    /// All categories, in table order
    pub const ALL: [Category; 7] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Volume,
        Category::Speed,
        Category::Time,
        Category::Energy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
            Category::Volume => "volume",
            Category::Speed => "speed",
            Category::Time => "time",
            Category::Energy => "energy",
        }
    }

    /// Whether every unit in this category relates to the base by a scale factor
    pub fn is_linear(&self) -> bool {
        !matches!(self, Category::Temperature)
    }

    /// Names of all categories, in table order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Category::name).collect()
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    /// Case-insensitive; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name() == key)
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
