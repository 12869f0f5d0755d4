//! Meal model
//!
//! A named collection of foods with running energy and weight totals.

use std::sync::Arc;

use indexmap::IndexMap;
use rust_decimal::Decimal;

use super::{FoodItem, NutritionalFacts};
use crate::nutrition::converter::checked_add;
use crate::nutrition::{
    calories_to_whole_kcal, require_group, NutritionError, NutritionResult, Unit, UnitGroup,
};

/// A meal made of one or more foods
#[derive(Debug, Clone)]
pub struct Meal {
    name: String,
    foods: Vec<Arc<FoodItem>>,
    /// Unrounded sum of food energies, in calories
    calories: Decimal,
    weight_mg: Decimal,
}

impl Meal {
    pub fn new(name: &str) -> NutritionResult<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            foods: Vec::new(),
            calories: Decimal::ZERO,
            weight_mg: Decimal::ZERO,
        })
    }

    /// Add a food, taking its current energy and weight into the totals
    ///
    /// Totals are captured when the food is added; the food is shared, not
    /// re-read on later queries.
    pub fn add_food(&mut self, food: impl Into<Arc<FoodItem>>) -> NutritionResult<()> {
        let food = food.into();

        let weight_mg = checked_add(self.weight_mg, food.weight(), "summing meal weight")?;
        let calories = checked_add(self.calories, food.calories(), "summing meal energy")?;
        self.weight_mg = weight_mg;
        self.calories = calories;

        tracing::debug!(
            meal = %self.name,
            food = food.name(),
            food_calories = %food.calories(),
            meal_calories = %self.calories,
            "Added food to meal"
        );

        self.foods.push(food);
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

    pub fn foods(&self) -> &[Arc<FoodItem>] {
        &self.foods
    }

    /// Total energy in calories, unrounded
    pub fn calories(&self) -> Decimal {
        self.calories
    }

    /// Total energy in kilocalories, rounded once from the unrounded sum
    pub fn kcal(&self) -> i64 {
        calories_to_whole_kcal(self.calories)
    }

    /// Total weight in milligrams
    pub fn weight(&self) -> Decimal {
        self.weight_mg
    }

    /// Meal-wide breakdown, the sum of every food's report
    pub fn nutritional_facts(
        &self,
        energy_unit: Unit,
        weight_unit: Unit,
    ) -> NutritionResult<NutritionalFacts> {
        require_group(energy_unit, UnitGroup::Energy)?;
        require_group(weight_unit, UnitGroup::Weight)?;

        let mut merged = NutritionalFacts::new();
        for food in &self.foods {
            merged.merge(&food.nutritional_facts(energy_unit, weight_unit)?)?;
        }
        Ok(merged)
    }

    /// One report per food, keyed by food name
    ///
    /// Foods sharing a name overwrite each other: the last one added wins and
    /// keeps the position of the first.
    pub fn facts_per_food(
        &self,
        energy_unit: Unit,
        weight_unit: Unit,
    ) -> NutritionResult<IndexMap<String, NutritionalFacts>> {
        let mut reports = IndexMap::new();
        for food in &self.foods {
            reports.insert(
                food.name().to_string(),
                food.nutritional_facts(energy_unit, weight_unit)?,
            );
        }
        Ok(reports)
    }
}

fn validate_name(name: &str) -> NutritionResult<()> {
    if name.trim().is_empty() {
        return Err(NutritionError::InvalidArgument(
            "Meal name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
