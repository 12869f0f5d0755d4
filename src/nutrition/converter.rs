//! Unit conversion functions
//!
//! Provides conversion between units of the same group and parsing of
//! "value + unit" strings such as `"2.5g"`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{NutritionError, NutritionResult};
use super::units::{lookup_unit, Unit, UnitGroup};

/// Fractional digits kept when dividing two measured quantities
pub const DIVISION_SCALE: u32 = 10;

// Digits and dots, then an optional letter suffix
static VALUE_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9.]+)([a-zA-Z]*)$").expect("Failed to compile value/unit pattern")
});

/// Caller-supplied amount: either a bare number or text like "100g"
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Number(Decimal),
    Text(String),
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Quantity::Number(value)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Quantity::Number(Decimal::from(value))
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Number(Decimal::from(value))
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity::Number(Decimal::from(value))
    }
}

impl From<f64> for Quantity {
    /// Non-finite floats are kept as text so parsing rejects them
    fn from(value: f64) -> Self {
        match Decimal::from_f64(value) {
            Some(d) => Quantity::Number(d),
            None => Quantity::Text(value.to_string()),
        }
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Quantity::Text(value)
    }
}

impl From<&String> for Quantity {
    fn from(value: &String) -> Self {
        Quantity::Text(value.clone())
    }
}

/// A numeric value paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub value: Decimal,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: Decimal, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Express this measurement in another unit of the same group
    pub fn to(&self, unit: Unit) -> NutritionResult<Decimal> {
        convert(self.value, self.unit, unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value.normalize(), self.unit)
    }
}

/// Convert a value from one unit to another within the same group
///
/// Identical units return the input untouched. Units from different groups
/// (e.g. grams to kilocalories) fail with [`NutritionError::InvalidUnit`].
pub fn convert(value: Decimal, from: Unit, to: Unit) -> NutritionResult<Decimal> {
    if from == to {
        return Ok(value);
    }

    if from.group() != to.group() {
        return Err(NutritionError::InvalidUnit(format!(
            "cannot convert {} ({}) to {} ({})",
            from,
            from.group(),
            to,
            to.group()
        )));
    }

    let ratio = checked_div(from.scale_factor(), to.scale_factor(), "computing conversion ratio")?;
    checked_mul(value, ratio, "converting units")
}

/// Check whether `unit` names a member of `group`
pub fn validate_unit(unit: &str, group: UnitGroup) -> bool {
    lookup_unit(unit).map_or(false, |u| u.group() == group)
}

/// Ensure a unit belongs to the expected group
pub fn require_group(unit: Unit, group: UnitGroup) -> NutritionResult<()> {
    if unit.group() == group {
        Ok(())
    } else {
        Err(NutritionError::InvalidUnit(format!(
            "expected a {} unit, got {} ({})",
            group,
            unit,
            unit.group()
        )))
    }
}

/// Split an amount into value and unit
///
/// Examples:
/// - `"1.5g"` -> 1.5 g
/// - `"100"` with default `g` -> 100 g
/// - `" 2.5KG "` -> 2.5 kg
/// - `"2.5 kg"` -> error, inner whitespace is not allowed
/// - `250` (numeric) with default `mg` -> 250 mg
///
/// Text is trimmed and lower-cased before matching `^([0-9.]+)([a-zA-Z]*)$`.
/// A letter suffix overrides `default_unit`.
pub fn parse_value_with_unit(
    input: impl Into<Quantity>,
    default_unit: Option<Unit>,
) -> NutritionResult<Measurement> {
    match input.into() {
        Quantity::Number(value) => default_unit
            .map(|unit| Measurement::new(value, unit))
            .ok_or_else(|| NutritionError::MissingUnit(value.to_string())),
        Quantity::Text(text) => {
            let normalized = text.trim().to_lowercase();

            let caps = VALUE_WITH_UNIT
                .captures(&normalized)
                .ok_or_else(|| NutritionError::InvalidFormat(text.clone()))?;

            let value = Decimal::from_str(&caps[1])
                .map_err(|_| NutritionError::InvalidFormat(text.clone()))?;

            let suffix = &caps[2];
            let unit = if suffix.is_empty() {
                default_unit.ok_or_else(|| NutritionError::MissingUnit(text.clone()))?
            } else {
                suffix.parse::<Unit>()?
            };

            Ok(Measurement::new(value, unit))
        }
    }
}

// ============================================================================
// Checked Decimal Arithmetic
// ============================================================================

pub(crate) fn checked_mul(a: Decimal, b: Decimal, context: &str) -> NutritionResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| NutritionError::Overflow(context.to_string()))
}

pub(crate) fn checked_add(a: Decimal, b: Decimal, context: &str) -> NutritionResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| NutritionError::Overflow(context.to_string()))
}

pub(crate) fn checked_div(a: Decimal, b: Decimal, context: &str) -> NutritionResult<Decimal> {
    if b.is_zero() {
        return Err(NutritionError::InvalidArgument(format!(
            "division by zero while {}",
            context
        )));
    }
    a.checked_div(b)
        .ok_or_else(|| NutritionError::Overflow(context.to_string()))
}

/// Divide and keep [`DIVISION_SCALE`] fractional digits
pub(crate) fn divide_precise(a: Decimal, b: Decimal, context: &str) -> NutritionResult<Decimal> {
    Ok(checked_div(a, b, context)?
        .round_dp_with_strategy(DIVISION_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Round half away from zero to `dp` fractional digits
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to the nearest whole number, saturating at the i64 bounds
pub fn to_whole_number(value: Decimal) -> i64 {
    let rounded = round_half_up(value, 0);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Convert calories to kilocalories and round to a whole number
pub fn calories_to_whole_kcal(calories: Decimal) -> i64 {
    // Dividing by a non-zero constant cannot overflow
    to_whole_number(calories / Unit::Kilocalorie.scale_factor())
}
