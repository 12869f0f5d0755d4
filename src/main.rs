//! Nutrition Calculator demo
//!
//! Builds the "Rice and Natto" reference meal and prints its nutritional facts
//! in the format selected by `NUTRICALC_FORMAT`.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nutricalc::build_info;
use nutricalc::config::{OutputFormat, ReportConfig};
use nutricalc::models::{FoodItem, Meal, NutrientType};
use nutricalc::nutrition::NutritionResult;
use nutricalc::reports::{self, MealReport};

/// Rice and natto, all amounts per 100 g of food
fn build_meal() -> NutritionResult<Meal> {
    let protein = Arc::new(NutrientType::protein());
    let fat = Arc::new(NutrientType::fat());
    let carbs = Arc::new(NutrientType::carbohydrate());

    let mut rice = FoodItem::new("Rice", "100g")?;
    rice.add_nutrition(&protein, "2.5g")?;
    rice.add_nutrition(&fat, "0.3g")?;
    rice.add_nutrition(&carbs, "37.1g")?;

    let mut natto = FoodItem::new("Natto", "100g")?;
    natto.add_nutrition(&protein, "16.5g")?;
    natto.add_nutrition(&fat, "10.0g")?;
    natto.add_nutrition(&carbs, "12.1g")?;

    let mut meal = Meal::new("Rice and Natto")?;
    meal.add_food(rice)?;
    meal.add_food(natto)?;
    Ok(meal)
}

fn print_summary(meal: &Meal, config: &ReportConfig) -> NutritionResult<()> {
    for food in meal.foods() {
        let facts = food.nutritional_facts(config.energy_unit, config.weight_unit)?;
        println!(
            "{}\n",
            reports::facts_to_summary(
                &format!("{} ({} kcal)", food.name(), food.kcal()),
                &facts,
                config.energy_unit,
                config.weight_unit,
            )
        );
    }

    let facts = meal.nutritional_facts(config.energy_unit, config.weight_unit)?;
    println!(
        "{}",
        reports::facts_to_summary(
            &format!("{} ({} kcal)", meal.name(), meal.kcal()),
            &facts,
            config.energy_unit,
            config.weight_unit,
        )
    );
    Ok(())
}

fn print_html(meal: &Meal, config: &ReportConfig) -> NutritionResult<()> {
    for (name, facts) in meal.facts_per_food(config.energy_unit, config.weight_unit)? {
        println!("<h2>{}</h2>", reports::escape_html(&name));
        println!(
            "{}",
            reports::facts_to_html(&facts, config.energy_unit, config.weight_unit)
        );
    }

    let facts = meal.nutritional_facts(config.energy_unit, config.weight_unit)?;
    println!("<h1>{}</h1>", reports::escape_html(meal.name()));
    println!(
        "{}",
        reports::facts_to_html(&facts, config.energy_unit, config.weight_unit)
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so reports on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutricalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("demo");

    let config = ReportConfig::from_env()?;
    tracing::info!(
        energy_unit = %config.energy_unit,
        weight_unit = %config.weight_unit,
        format = %config.format,
        "Loaded report configuration"
    );

    let meal = build_meal()?;
    tracing::info!(meal = meal.name(), kcal = meal.kcal(), "Meal calculated");

    match config.format {
        OutputFormat::Summary => print_summary(&meal, &config)?,
        OutputFormat::Html => print_html(&meal, &config)?,
        OutputFormat::Json => {
            let report = MealReport::from_meal(&meal, config.energy_unit, config.weight_unit)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_meal() {
        let meal = build_meal().unwrap();
        assert_eq!(meal.foods().len(), 2);
        assert_eq!(meal.foods()[0].kcal(), 161);
        assert_eq!(meal.foods()[1].kcal(), 204);
        assert_eq!(meal.kcal(), 366);
    }
}
