//! Food Item model
//!
//! A named, weighed food holding nutrient contributions. Each contribution
//! declares "N grams of nutrient per M grams of food"; the food scales that
//! to its own total weight and accumulates the resulting energy.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{NutrientFact, NutrientType, NutritionalFacts};
use crate::nutrition::converter::{checked_add, checked_div, checked_mul, divide_precise};
use crate::nutrition::{
    calories_to_whole_kcal, convert, parse_value_with_unit, require_group, Measurement,
    NutritionError, NutritionResult, Quantity, Unit, UnitGroup,
};

/// Reference weight used when a contribution does not name one
pub const DEFAULT_REFERENCE_GRAMS: i64 = 100;

/// One recorded addition of a nutrient to a food
#[derive(Debug, Clone)]
pub struct NutrientContribution {
    nutrient: Arc<NutrientType>,
    /// Declared nutrient amount, e.g. 2.5 g
    amount: Measurement,
    /// Reference food weight the amount is given for, e.g. 100 g
    per: Measurement,
    /// Nutrient mass across the whole food, fixed when the contribution was added
    scaled_weight_mg: Decimal,
    /// Energy of `scaled_weight_mg` in calories
    energy_cal: Decimal,
}

impl NutrientContribution {
    pub fn nutrient(&self) -> &NutrientType {
        &self.nutrient
    }

    pub fn amount(&self) -> Measurement {
        self.amount
    }

    pub fn per(&self) -> Measurement {
        self.per
    }

    pub fn scaled_weight_mg(&self) -> Decimal {
        self.scaled_weight_mg
    }

    /// Energy contributed to the food, in calories
    pub fn energy(&self) -> Decimal {
        self.energy_cal
    }

    fn compute_energy(&self) -> NutritionResult<Decimal> {
        self.nutrient
            .get_energy(self.scaled_weight_mg, Unit::Calorie, Unit::Milligram)
    }
}

/// A food with nutrient contributions
#[derive(Debug, Clone)]
pub struct FoodItem {
    name: String,
    weight_mg: Decimal,
    contributions: Vec<NutrientContribution>,
    /// Running total in calories
    calories: Decimal,
}

impl FoodItem {
    /// Create a food; bare numbers in `weight` are grams
    pub fn new(name: &str, weight: impl Into<Quantity>) -> NutritionResult<Self> {
        validate_name(name)?;
        let mut food = Self {
            name: name.to_string(),
            weight_mg: Decimal::ZERO,
            contributions: Vec::new(),
            calories: Decimal::ZERO,
        };
        food.set_weight(weight)?;
        Ok(food)
    }

    /// Add a nutrient declared per 100 g of food
    pub fn add_nutrition(
        &mut self,
        nutrient: &Arc<NutrientType>,
        amount: impl Into<Quantity>,
    ) -> NutritionResult<()> {
        self.add_nutrition_per(nutrient, amount, DEFAULT_REFERENCE_GRAMS)
    }

    /// Add a nutrient declared as `amount` per `per` of food
    ///
    /// Bare numbers in either argument are grams.
    pub fn add_nutrition_per(
        &mut self,
        nutrient: &Arc<NutrientType>,
        amount: impl Into<Quantity>,
        per: impl Into<Quantity>,
    ) -> NutritionResult<()> {
        let amount = parse_weight(amount)?;
        let per = parse_weight(per)?;

        let per_mg = per.to(Unit::Milligram)?;
        if per_mg.is_zero() {
            return Err(NutritionError::InvalidArgument(format!(
                "reference weight for '{}' must be greater than zero",
                nutrient.name()
            )));
        }

        // Fraction of the reference weight present in this food
        let scale = checked_div(self.weight_mg, per_mg, "scaling reference weight")?;
        let scaled_weight_mg =
            checked_mul(amount.to(Unit::Milligram)?, scale, "scaling nutrient weight")?;

        let mut contribution = NutrientContribution {
            nutrient: Arc::clone(nutrient),
            amount,
            per,
            scaled_weight_mg,
            energy_cal: Decimal::ZERO,
        };
        contribution.energy_cal = contribution.compute_energy()?;
        self.calories = checked_add(self.calories, contribution.energy_cal, "summing food energy")?;

        tracing::debug!(
            food = %self.name,
            nutrient = contribution.nutrient.name(),
            amount = %amount,
            per = %per,
            energy_cal = %contribution.energy_cal,
            "Added nutrient contribution"
        );

        self.contributions.push(contribution);
        Ok(())
    }

    /// Recompute every contribution's energy and return the new total (cal)
    ///
    /// Scaled nutrient weights were fixed when each contribution was added
    /// and are not re-derived from the current food weight.
    pub fn recalculate(&mut self) -> NutritionResult<Decimal> {
        let mut total = Decimal::ZERO;
        for contribution in &mut self.contributions {
            contribution.energy_cal = contribution.compute_energy()?;
            total = checked_add(total, contribution.energy_cal, "summing food energy")?;
        }
        self.calories = total;

        tracing::debug!(food = %self.name, calories = %total, "Recalculated food energy");
        Ok(total)
    }

    /// Replace the food weight; bare numbers are grams
    ///
    /// Existing contributions keep their scaled weights. Call
    /// [`FoodItem::recalculate`] afterwards if nutrients were already added.
    pub fn set_weight(&mut self, weight: impl Into<Quantity>) -> NutritionResult<()> {
        let weight_mg = parse_weight(weight)?.to(Unit::Milligram)?;

        if !self.contributions.is_empty() && weight_mg != self.weight_mg {
            tracing::warn!(
                food = %self.name,
                "Weight changed after nutrients were added; existing contributions are not rescaled"
            );
        }

        self.weight_mg = weight_mg;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> NutritionResult<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Total energy in kilocalories, rounded to a whole number
    pub fn kcal(&self) -> i64 {
        calories_to_whole_kcal(self.calories)
    }

    /// Accumulated energy in calories, unrounded
    pub fn calories(&self) -> Decimal {
        self.calories
    }

    /// Total weight in milligrams
    pub fn weight(&self) -> Decimal {
        self.weight_mg
    }

    pub fn contributions(&self) -> &[NutrientContribution] {
        &self.contributions
    }

    /// Per-nutrient breakdown in the requested units
    ///
    /// `singleEnergy`/`singleWeight` are per one `weight_unit` of food; for a
    /// food of zero weight they are reported as zero.
    pub fn nutritional_facts(
        &self,
        energy_unit: Unit,
        weight_unit: Unit,
    ) -> NutritionResult<NutritionalFacts> {
        require_group(energy_unit, UnitGroup::Energy)?;
        require_group(weight_unit, UnitGroup::Weight)?;

        let mut report = NutritionalFacts::new();
        let food_weight = convert(self.weight_mg, Unit::Milligram, weight_unit)?;

        for contribution in &self.contributions {
            let nutrient = contribution.nutrient();
            let energy = convert(contribution.energy_cal, Unit::Calorie, energy_unit)?;
            let weight = contribution.amount.to(weight_unit)?;

            let (single_energy, single_weight) = if food_weight.is_zero() {
                (Decimal::ZERO, Decimal::ZERO)
            } else {
                (
                    divide_precise(energy, food_weight, "computing energy per unit")?,
                    divide_precise(weight, food_weight, "computing weight per unit")?,
                )
            };

            let entry = NutrientFact {
                single_energy,
                single_weight,
                energy,
                weight,
                ..NutrientFact::for_nutrient(nutrient)
            };

            match report.facts.get_mut(nutrient.name()) {
                Some(existing) => existing.add_figures(&entry)?,
                None => {
                    report.facts.insert(nutrient.name().to_string(), entry);
                }
            }

            report.totals.energy_per_unit =
                checked_add(report.totals.energy_per_unit, single_energy, "summing totals")?;
            report.totals.energy = checked_add(report.totals.energy, energy, "summing totals")?;
        }

        Ok(report)
    }
}

fn validate_name(name: &str) -> NutritionResult<()> {
    if name.trim().is_empty() {
        return Err(NutritionError::InvalidArgument(
            "Food name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn parse_weight(input: impl Into<Quantity>) -> NutritionResult<Measurement> {
    let measurement = parse_value_with_unit(input, Some(Unit::Gram))?;
    if !measurement.unit.is_weight() {
        return Err(NutritionError::InvalidUnit(format!(
            "expected a weight, got {}",
            measurement
        )));
    }
    if measurement.value.is_sign_negative() && !measurement.value.is_zero() {
        return Err(NutritionError::InvalidArgument(format!(
            "weight cannot be negative, got {}",
            measurement
        )));
    }
    Ok(measurement)
}
