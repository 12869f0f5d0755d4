//! Report rendering
//!
//! Turns a [`NutritionalFacts`] report into an HTML table or a plain-text
//! summary. Rendering only rounds for display; the report itself is untouched.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::models::{Meal, NutritionalFacts};
use crate::nutrition::{round_half_up, NutritionResult, Unit};

// ============================================================================
// Response Types
// ============================================================================

/// Everything the tools print about a meal, ready for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct MealReport {
    pub meal: String,
    pub kcal: i64,
    /// Unrounded energy in calories
    pub calories: Decimal,
    pub weight_mg: Decimal,
    pub energy_unit: Unit,
    pub weight_unit: Unit,
    pub foods: IndexMap<String, NutritionalFacts>,
    pub facts: NutritionalFacts,
    pub generator: BuildInfo,
}

impl MealReport {
    pub fn from_meal(meal: &Meal, energy_unit: Unit, weight_unit: Unit) -> NutritionResult<Self> {
        Ok(Self {
            meal: meal.name().to_string(),
            kcal: meal.kcal(),
            calories: meal.calories(),
            weight_mg: meal.weight(),
            energy_unit,
            weight_unit,
            foods: meal.facts_per_food(energy_unit, weight_unit)?,
            facts: meal.nutritional_facts(energy_unit, weight_unit)?,
            generator: BuildInfo::current(),
        })
    }
}

// ============================================================================
// Display Precision
// ============================================================================

const ENERGY_DP: u32 = 0;
const WEIGHT_DP: u32 = 1;
const PER_UNIT_DP: u32 = 2;

const TABLE_CLASS: &str = "table table-striped table-bordered";

fn fmt_dp(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_half_up(value, dp))
}

/// Escape text for use inside HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// HTML
// ============================================================================

/// Render a report as an HTML table, one row per nutrient plus a total row
pub fn facts_to_html(report: &NutritionalFacts, energy_unit: Unit, weight_unit: Unit) -> String {
    let mut html = String::new();
    html.push_str(&format!("<table class='{}'>", TABLE_CLASS));
    html.push_str("<thead><tr><th>Nutrition</th><th>Energy</th><th>Weight</th></tr></thead>");
    html.push_str("<tbody>");

    for fact in report.facts.values() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{} {}</td><td>{}{}</td></tr>",
            escape_html(&fact.label),
            fmt_dp(fact.energy, ENERGY_DP),
            energy_unit,
            fmt_dp(fact.weight, WEIGHT_DP),
            weight_unit,
        ));
    }

    html.push_str(&format!(
        "<tr><td>Total</td><td>{} {}</td><td>{} {} per {}</td></tr>",
        fmt_dp(report.totals.energy, ENERGY_DP),
        energy_unit,
        fmt_dp(report.totals.energy_per_unit, PER_UNIT_DP),
        energy_unit,
        weight_unit,
    ));

    html.push_str("</tbody>");
    html.push_str("</table>");
    html
}

// ============================================================================
// Plain Text
// ============================================================================

/// Render a report as a fixed-width text table for terminals
pub fn facts_to_summary(
    title: &str,
    report: &NutritionalFacts,
    energy_unit: Unit,
    weight_unit: Unit,
) -> String {
    let mut lines = Vec::new();
    lines.push(title.to_string());
    lines.push(format!(
        "{:<16} {:>6} {:>12} {:>12} {:>16}",
        "Nutrient",
        "Code",
        format!("Energy ({})", energy_unit),
        format!("Weight ({})", weight_unit),
        format!("{}/{}", energy_unit, weight_unit),
    ));
    lines.push("-".repeat(66));

    for fact in report.facts.values() {
        lines.push(format!(
            "{:<16} {:>6} {:>12} {:>12} {:>16}",
            fact.label,
            fact.code,
            fmt_dp(fact.energy, WEIGHT_DP),
            fmt_dp(fact.weight, WEIGHT_DP),
            fmt_dp(fact.single_energy, PER_UNIT_DP),
        ));
    }

    lines.push("-".repeat(66));
    lines.push(format!(
        "{:<16} {:>6} {:>12} {:>12} {:>16}",
        "Total",
        "",
        fmt_dp(report.totals.energy, WEIGHT_DP),
        "",
        fmt_dp(report.totals.energy_per_unit, PER_UNIT_DP),
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{FoodItem, Meal, NutrientType};

    fn rice_report() -> NutritionalFacts {
        let mut rice = FoodItem::new("Rice", "100g").unwrap();
        rice.add_nutrition(&Arc::new(NutrientType::protein()), "2.5g").unwrap();
        rice.add_nutrition(&Arc::new(NutrientType::fat()), "0.3g").unwrap();
        rice.add_nutrition(&Arc::new(NutrientType::carbohydrate()), "37.1g").unwrap();
        rice.nutritional_facts(Unit::Kilocalorie, Unit::Gram).unwrap()
    }

    #[test]
    fn test_html_rows_and_totals() {
        let html = facts_to_html(&rice_report(), Unit::Kilocalorie, Unit::Gram);

        assert!(html.starts_with("<table class='table table-striped table-bordered'>"));
        assert!(html.contains("<tr><td>Protein</td><td>10 kcal</td><td>2.5g</td></tr>"));
        assert!(html.contains("<tr><td>Fat</td><td>3 kcal</td><td>0.3g</td></tr>"));
        assert!(html.contains("<tr><td>Carbohydrate</td><td>148 kcal</td><td>37.1g</td></tr>"));
        assert!(html.contains("<tr><td>Total</td><td>161 kcal</td><td>1.61 kcal per g</td></tr>"));
        assert!(html.ends_with("</tbody></table>"));

        let protein = html.find("<td>Protein</td>").unwrap();
        let fat = html.find("<td>Fat</td>").unwrap();
        let carbs = html.find("<td>Carbohydrate</td>").unwrap();
        assert!(protein < fat && fat < carbs);
    }

    #[test]
    fn test_html_escapes_labels() {
        let odd = Arc::new(NutrientType::new("<b>Sugar & Co</b>", Decimal::ONE).unwrap());
        let mut food = FoodItem::new("Candy", "10g").unwrap();
        food.add_nutrition(&odd, "5g").unwrap();
        let report = food.nutritional_facts(Unit::Kilocalorie, Unit::Gram).unwrap();

        let html = facts_to_html(&report, Unit::Kilocalorie, Unit::Gram);
        assert!(html.contains("&lt;b&gt;Sugar &amp; Co&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_meal_report_json() {
        let mut rice = FoodItem::new("Rice", "100g").unwrap();
        rice.add_nutrition(&Arc::new(NutrientType::protein()), "2.5g").unwrap();
        let mut meal = Meal::new("Snack").unwrap();
        meal.add_food(rice).unwrap();

        let report = MealReport::from_meal(&meal, Unit::Kilocalorie, Unit::Gram).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["meal"], "Snack");
        assert_eq!(value["kcal"], 10);
        assert_eq!(value["energy_unit"], "kcal");
        assert_eq!(value["weight_unit"], "g");
        assert_eq!(value["foods"]["Rice"]["totals"]["energy"].as_f64(), Some(10.0));
        assert_eq!(value["facts"]["facts"]["Protein"]["weight"].as_f64(), Some(2.5));
        assert_eq!(value["generator"]["name"], "nutricalc");
        assert_eq!(
            value["generator"]["report_schema"],
            crate::build_info::REPORT_SCHEMA_VERSION
        );
    }

    #[test]
    fn test_summary_lists_every_nutrient() {
        let text = facts_to_summary("Rice", &rice_report(), Unit::Kilocalorie, Unit::Gram);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Rice");
        assert!(lines[1].contains("Energy (kcal)"));
        assert_eq!(lines.len(), 3 + 3 + 2);
        assert!(lines.iter().any(|l| l.starts_with("Protein") && l.contains("10.0")));
        assert!(lines.last().unwrap().starts_with("Total"));
        assert!(lines.last().unwrap().contains("161.1"));
        assert!(lines.last().unwrap().contains("1.61"));
    }
}
