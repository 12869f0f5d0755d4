//! Nutrition Calculator Library
//!
//! Unit conversion and calorie aggregation for nutrients, foods and meals.
//!
//! ```
//! use std::sync::Arc;
//! use nutricalc::models::{FoodItem, Meal, NutrientType};
//!
//! let protein = Arc::new(NutrientType::protein());
//! let fat = Arc::new(NutrientType::fat());
//! let carbs = Arc::new(NutrientType::carbohydrate());
//!
//! let mut rice = FoodItem::new("Rice", "100g")?;
//! rice.add_nutrition(&protein, "2.5g")?;
//! rice.add_nutrition(&fat, "0.3g")?;
//! rice.add_nutrition(&carbs, "37.1g")?;
//! assert_eq!(rice.kcal(), 161);
//!
//! let mut meal = Meal::new("Lunch")?;
//! meal.add_food(rice)?;
//! assert_eq!(meal.kcal(), 161);
//! # Ok::<(), nutricalc::nutrition::NutritionError>(())
//! ```

pub mod build_info;
pub mod config;
pub mod models;
pub mod nutrition;
pub mod reports;
