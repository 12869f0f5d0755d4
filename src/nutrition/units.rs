//! Unit types and conversion constants
//!
//! Provides the fixed table of convertible units. Every unit belongs to exactly
//! one group and carries a linear scale factor relative to its group's base unit.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::NutritionError;

/// Group of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    /// Mass units, based on milligrams
    Weight,
    /// Energy units, based on calories
    Energy,
}

impl UnitGroup {
    /// The unit whose scale factor is 1 within this group
    pub fn base_unit(&self) -> Unit {
        match self {
            UnitGroup::Weight => Unit::Milligram,
            UnitGroup::Energy => Unit::Calorie,
        }
    }

    /// All units belonging to this group, smallest first
    pub fn units(&self) -> &'static [Unit] {
        match self {
            UnitGroup::Weight => &[Unit::Milligram, Unit::Gram, Unit::Kilogram],
            UnitGroup::Energy => &[Unit::Calorie, Unit::Kilocalorie],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitGroup::Weight => "weight",
            UnitGroup::Energy => "energy",
        }
    }
}

impl FromStr for UnitGroup {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" => Ok(UnitGroup::Weight),
            "energy" => Ok(UnitGroup::Energy),
            other => Err(NutritionError::InvalidUnit(format!(
                "unknown unit group '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measurement unit known to the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "cal")]
    Calorie,
    #[serde(rename = "kcal")]
    Kilocalorie,
}

// ============================================================================
// Scale Factors (relative to the group's base unit)
// ============================================================================

/// Milligrams per gram
pub const MG_PER_G: i64 = 1_000;
/// Milligrams per kilogram
pub const MG_PER_KG: i64 = 1_000_000;
/// Calories per kilocalorie
pub const CAL_PER_KCAL: i64 = 1_000;

impl Unit {
    /// Canonical symbol, e.g. "kcal"
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Calorie => "cal",
            Unit::Kilocalorie => "kcal",
        }
    }

    pub fn group(&self) -> UnitGroup {
        match self {
            Unit::Milligram | Unit::Gram | Unit::Kilogram => UnitGroup::Weight,
            Unit::Calorie | Unit::Kilocalorie => UnitGroup::Energy,
        }
    }

    /// How many base units (mg or cal) one of this unit is worth
    pub fn scale_factor(&self) -> Decimal {
        match self {
            Unit::Milligram | Unit::Calorie => Decimal::ONE,
            Unit::Gram => Decimal::from(MG_PER_G),
            Unit::Kilogram => Decimal::from(MG_PER_KG),
            Unit::Kilocalorie => Decimal::from(CAL_PER_KCAL),
        }
    }

    pub fn is_weight(&self) -> bool {
        self.group() == UnitGroup::Weight
    }

    pub fn is_energy(&self) -> bool {
        self.group() == UnitGroup::Energy
    }
}

/// Look up a unit by symbol or long name
pub fn lookup_unit(unit: &str) -> Option<Unit> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "mg" | "milligram" | "milligrams" => Some(Unit::Milligram),
        "g" | "gram" | "grams" => Some(Unit::Gram),
        "kg" | "kilogram" | "kilograms" => Some(Unit::Kilogram),
        "cal" | "calorie" | "calories" => Some(Unit::Calorie),
        "kcal" | "kilocalorie" | "kilocalories" => Some(Unit::Kilocalorie),
        _ => None,
    }
}

impl FromStr for Unit {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_unit(s).ok_or_else(|| NutritionError::InvalidUnit(format!("unknown unit '{}'", s)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_symbols_and_aliases() {
        assert_eq!(lookup_unit("mg"), Some(Unit::Milligram));
        assert_eq!(lookup_unit("grams"), Some(Unit::Gram));
        assert_eq!(lookup_unit(" KG "), Some(Unit::Kilogram));
        assert_eq!(lookup_unit("kilocalories"), Some(Unit::Kilocalorie));
        assert_eq!(lookup_unit("oz"), None);
        assert_eq!(lookup_unit(""), None);
    }

    #[test]
    fn test_base_unit_factor_is_one() {
        for group in [UnitGroup::Weight, UnitGroup::Energy] {
            assert_eq!(group.base_unit().scale_factor(), Decimal::ONE);
            assert!(group.units().contains(&group.base_unit()));
        }
    }

    #[test]
    fn test_groups_are_disjoint() {
        for unit in UnitGroup::Weight.units() {
            assert!(unit.is_weight());
            assert!(!UnitGroup::Energy.units().contains(unit));
        }
        for unit in UnitGroup::Energy.units() {
            assert!(unit.is_energy());
        }
    }

    #[test]
    fn test_parse_unit_error() {
        let err = "stone".parse::<Unit>().unwrap_err();
        assert!(matches!(err, NutritionError::InvalidUnit(_)));
        assert_eq!("Energy".parse::<UnitGroup>().unwrap(), UnitGroup::Energy);
        assert!("volume".parse::<UnitGroup>().is_err());
    }

    #[test]
    fn test_display_uses_symbol() {
        assert_eq!(Unit::Kilocalorie.to_string(), "kcal");
        assert_eq!(UnitGroup::Weight.to_string(), "weight");
    }
}
