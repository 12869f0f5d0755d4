//! Data models
//!
//! Nutrients, foods, meals and the fact reports they produce.

mod food_item;
mod meal;
mod nutrient_type;
mod nutritional_facts;

pub use food_item::{FoodItem, NutrientContribution, DEFAULT_REFERENCE_GRAMS};
pub use meal::Meal;
pub use nutrient_type::{
    NutrientType, CARBOHYDRATE_KCAL_PER_G, FAT_KCAL_PER_G, PROTEIN_KCAL_PER_G,
};
pub use nutritional_facts::{merge_extras, FactTotals, NutrientFact, NutritionalFacts};
