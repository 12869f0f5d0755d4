//! Nutritional fact report
//!
//! The per-nutrient energy/weight breakdown produced by foods and merged
//! across foods by meals. Field names serialize exactly as presentation
//! layers consume them (`facts`, `totals`, `singleEnergy`, ...).

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::NutrientType;
use crate::nutrition::converter::checked_add;
use crate::nutrition::NutritionResult;

/// Breakdown of a food or meal, keyed by nutrient name in the order
/// nutrients were first added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalFacts {
    pub facts: IndexMap<String, NutrientFact>,
    pub totals: FactTotals,
}

/// Figures for one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientFact {
    pub label: String,
    pub code: String,
    pub description: String,
    pub extra: Map<String, Value>,
    /// Energy per one unit of food weight
    pub single_energy: Decimal,
    /// Nutrient weight per one unit of food weight
    pub single_weight: Decimal,
    pub energy: Decimal,
    pub weight: Decimal,
}

/// Report-wide sums
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactTotals {
    pub energy_per_unit: Decimal,
    pub energy: Decimal,
}

impl NutrientFact {
    /// Zeroed entry carrying the nutrient's descriptive fields
    pub fn for_nutrient(nutrient: &NutrientType) -> Self {
        Self {
            label: nutrient.name().to_string(),
            code: nutrient.code().to_string(),
            description: nutrient.description().to_string(),
            extra: nutrient.extras().clone(),
            single_energy: Decimal::ZERO,
            single_weight: Decimal::ZERO,
            energy: Decimal::ZERO,
            weight: Decimal::ZERO,
        }
    }

    /// Sum the numeric figures; descriptive fields and `extra` are untouched
    pub fn add_figures(&mut self, other: &NutrientFact) -> NutritionResult<()> {
        self.single_energy = checked_add(self.single_energy, other.single_energy, "merging facts")?;
        self.single_weight = checked_add(self.single_weight, other.single_weight, "merging facts")?;
        self.energy = checked_add(self.energy, other.energy, "merging facts")?;
        self.weight = checked_add(self.weight, other.weight, "merging facts")?;
        Ok(())
    }
}

impl FactTotals {
    pub fn merge(&mut self, other: &FactTotals) -> NutritionResult<()> {
        self.energy_per_unit =
            checked_add(self.energy_per_unit, other.energy_per_unit, "merging totals")?;
        self.energy = checked_add(self.energy, other.energy, "merging totals")?;
        Ok(())
    }
}

impl NutritionalFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merge another report into this one
    ///
    /// Nutrients missing here are appended, nutrients present on both sides
    /// have their figures summed and their `extra` metadata merged.
    pub fn merge(&mut self, other: &NutritionalFacts) -> NutritionResult<()> {
        for (name, fact) in &other.facts {
            match self.facts.get_mut(name) {
                Some(existing) => {
                    existing.add_figures(fact)?;
                    merge_extras(&mut existing.extra, &fact.extra);
                }
                None => {
                    self.facts.insert(name.clone(), fact.clone());
                }
            }
        }
        self.totals.merge(&other.totals)
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Recursively merge free-form metadata
///
/// Missing keys are copied, numbers are summed, nested objects and arrays
/// merge element by element. Any other conflict keeps the existing value.
pub fn merge_extras(acc: &mut Map<String, Value>, incoming: &Map<String, Value>) {
    for (key, value) in incoming {
        match acc.get_mut(key) {
            Some(slot) => merge_value(slot, value),
            None => {
                acc.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_value(slot: &mut Value, incoming: &Value) {
    match (slot, incoming) {
        (Value::Object(acc), Value::Object(inc)) => merge_extras(acc, inc),
        (Value::Array(acc), Value::Array(inc)) => {
            for (i, value) in inc.iter().enumerate() {
                match acc.get_mut(i) {
                    Some(existing) => merge_value(existing, value),
                    None => acc.push(value.clone()),
                }
            }
        }
        (Value::Number(acc), Value::Number(inc)) => {
            if let Some(sum) = add_numbers(acc, inc) {
                *acc = sum;
            }
        }
        _ => {}
    }
}

fn add_numbers(a: &Number, b: &Number) -> Option<Number> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Some(Number::from(sum));
        }
    }
    Number::from_f64(a.as_f64()? + b.as_f64()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fact(label: &str, energy: Decimal, weight: Decimal) -> NutrientFact {
        NutrientFact {
            label: label.to_string(),
            code: label[..1].to_string(),
            description: String::new(),
            extra: Map::new(),
            single_energy: energy / dec!(100),
            single_weight: weight / dec!(100),
            energy,
            weight,
        }
    }

    fn report(entries: Vec<NutrientFact>) -> NutritionalFacts {
        let mut facts = NutritionalFacts::new();
        for entry in entries {
            facts.totals.energy += entry.energy;
            facts.totals.energy_per_unit += entry.single_energy;
            facts.facts.insert(entry.label.clone(), entry);
        }
        facts
    }

    #[test]
    fn test_merge_sums_shared_nutrients() {
        let mut acc = report(vec![fact("Protein", dec!(10), dec!(2.5))]);
        let other = report(vec![fact("Protein", dec!(66), dec!(16.5))]);

        acc.merge(&other).unwrap();

        let protein = &acc.facts["Protein"];
        assert_eq!(protein.energy, dec!(76));
        assert_eq!(protein.weight, dec!(19.0));
        assert_eq!(protein.single_energy, dec!(0.76));
        assert_eq!(protein.label, "Protein");
        assert_eq!(protein.code, "P");
        assert_eq!(acc.totals.energy, dec!(76));
    }

    #[test]
    fn test_merge_sums_extras_of_shared_nutrients() {
        let mut first = fact("Carbohydrate", dec!(20), dec!(5));
        first.extra = json!({ "vitamin_c_mg": 12 }).as_object().cloned().unwrap();
        let mut acc = report(vec![first.clone()]);
        let other = report(vec![first]);

        acc.merge(&other).unwrap();

        assert_eq!(acc.facts["Carbohydrate"].extra["vitamin_c_mg"], json!(24));
    }

    #[test]
    fn test_add_figures_leaves_extras_alone() {
        let mut acc = fact("Carbohydrate", dec!(20), dec!(5));
        acc.extra = json!({ "vitamin_c_mg": 12 }).as_object().cloned().unwrap();
        let other = acc.clone();

        acc.add_figures(&other).unwrap();

        assert_eq!(acc.energy, dec!(40));
        assert_eq!(acc.extra["vitamin_c_mg"], json!(12));
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let mut acc = report(vec![fact("Protein", dec!(10), dec!(2.5))]);
        let other = report(vec![
            fact("Fat", dec!(2.7), dec!(0.3)),
            fact("Protein", dec!(66), dec!(16.5)),
            fact("Carbs", dec!(148.4), dec!(37.1)),
        ]);

        acc.merge(&other).unwrap();

        let order: Vec<&str> = acc.facts.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Protein", "Fat", "Carbs"]);
    }

    #[test]
    fn test_merge_copies_missing_nutrients() {
        let mut acc = NutritionalFacts::new();
        let other = report(vec![fact("Fat", dec!(2.7), dec!(0.3)), fact("Carbs", dec!(148.4), dec!(37.1))]);

        acc.merge(&other).unwrap();

        assert_eq!(acc, other);
    }

    #[test]
    fn test_merge_extras_deeply() {
        let mut acc = json!({
            "vitamins": { "c_mg": 10, "b12_ug": 0.5 },
            "source": "label",
            "servings": [1, 2]
        })
        .as_object()
        .cloned()
        .unwrap();
        let incoming = json!({
            "vitamins": { "c_mg": 5, "d_ug": 2 },
            "source": "lab",
            "servings": [3, 4, 5],
            "organic": true
        })
        .as_object()
        .cloned()
        .unwrap();

        merge_extras(&mut acc, &incoming);

        assert_eq!(
            Value::Object(acc),
            json!({
                "vitamins": { "c_mg": 15, "b12_ug": 0.5, "d_ug": 2 },
                "source": "label",
                "servings": [4, 6, 5],
                "organic": true
            })
        );
    }

    #[test]
    fn test_serialized_shape() {
        let facts = report(vec![fact("Protein", dec!(10), dec!(2.5))]);
        let value = serde_json::to_value(&facts).unwrap();

        assert!(value["facts"]["Protein"]["singleEnergy"].is_number());
        assert!(value["facts"]["Protein"]["singleWeight"].is_number());
        assert_eq!(value["facts"]["Protein"]["label"], json!("Protein"));
        assert!(value["totals"]["energy_per_unit"].is_number());
        assert_eq!(value["totals"]["energy"].as_f64(), Some(10.0));
    }
}
