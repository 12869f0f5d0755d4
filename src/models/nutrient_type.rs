//! Nutrient Type model
//!
//! An immutable energy-density constant for one nutrient category, shared
//! read-only between every food that contains it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::nutrition::converter::{checked_div, checked_mul};
use crate::nutrition::{
    convert, require_group, round_half_up, NutritionError, NutritionResult, Unit, UnitGroup,
};

/// Kilocalories per gram of protein
pub const PROTEIN_KCAL_PER_G: i64 = 4;
/// Kilocalories per gram of fat
pub const FAT_KCAL_PER_G: i64 = 9;
/// Kilocalories per gram of carbohydrate
pub const CARBOHYDRATE_KCAL_PER_G: i64 = 4;

/// A nutrient category and its energy density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientType {
    name: String,
    code: String,
    /// Calories per milligram, full precision
    energy_per_mg: Decimal,
    #[serde(default)]
    description: String,
    #[serde(default)]
    extras: Map<String, Value>,
}

impl NutrientType {
    /// Create a nutrient from its energy in kcal per gram
    pub fn new(name: &str, kcal_per_g: Decimal) -> NutritionResult<Self> {
        Self::with_units(name, kcal_per_g, None, Unit::Kilocalorie, Unit::Gram)
    }

    /// Create a nutrient from `energy_amount` `energy_unit` per one `weight_unit`
    ///
    /// `code` falls back to `name` when missing or empty.
    pub fn with_units(
        name: &str,
        energy_amount: Decimal,
        code: Option<&str>,
        energy_unit: Unit,
        weight_unit: Unit,
    ) -> NutritionResult<Self> {
        if name.trim().is_empty() {
            return Err(NutritionError::InvalidArgument(
                "nutrient name cannot be empty".to_string(),
            ));
        }
        if energy_amount.is_sign_negative() && !energy_amount.is_zero() {
            return Err(NutritionError::InvalidArgument(format!(
                "energy of '{}' cannot be negative",
                name
            )));
        }
        require_group(energy_unit, UnitGroup::Energy)?;
        require_group(weight_unit, UnitGroup::Weight)?;

        let calories = convert(energy_amount, energy_unit, Unit::Calorie)?;
        let milligrams = convert(Decimal::ONE, weight_unit, Unit::Milligram)?;
        let energy_per_mg = checked_div(calories, milligrams, "computing energy density")?;

        let code = match code {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => name.to_string(),
        };

        Ok(Self {
            name: name.to_string(),
            code,
            energy_per_mg,
            description: String::new(),
            extras: Map::new(),
        })
    }

    pub fn protein() -> Self {
        Self::standard("Protein", "P", PROTEIN_KCAL_PER_G)
    }

    pub fn fat() -> Self {
        Self::standard("Fat", "F", FAT_KCAL_PER_G)
    }

    pub fn carbohydrate() -> Self {
        Self::standard("Carbohydrate", "C", CARBOHYDRATE_KCAL_PER_G)
    }

    // 1 kcal/g is 1000 cal per 1000 mg, so kcal/g equals cal/mg
    fn standard(name: &str, code: &str, kcal_per_g: i64) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            energy_per_mg: Decimal::from(kcal_per_g),
            description: String::new(),
            extras: Map::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Attach free-form metadata, e.g. vitamin content
    pub fn with_extras(mut self, extras: Map<String, Value>) -> Self {
        self.extras = extras;
        self
    }

    /// Energy contained in `weight` of this nutrient
    ///
    /// Results in kcal are rounded to a whole number.
    pub fn get_energy(
        &self,
        weight: Decimal,
        energy_unit: Unit,
        weight_unit: Unit,
    ) -> NutritionResult<Decimal> {
        require_group(energy_unit, UnitGroup::Energy)?;
        require_group(weight_unit, UnitGroup::Weight)?;

        let milligrams = convert(weight, weight_unit, Unit::Milligram)?;
        let calories = checked_mul(self.energy_per_mg, milligrams, "computing nutrient energy")?;
        let energy = convert(calories, Unit::Calorie, energy_unit)?;

        if energy_unit == Unit::Kilocalorie {
            Ok(round_half_up(energy, 0))
        } else {
            Ok(energy)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Stored energy density in calories per milligram
    pub fn calories_per_mg(&self) -> Decimal {
        self.energy_per_mg
    }
}
