//! Nutrition calculation module
//!
//! Handles unit conversions, value parsing and the shared error type.

pub mod converter;
pub mod error;
pub mod units;

pub use converter::{
    calories_to_whole_kcal, convert, parse_value_with_unit, require_group, round_half_up,
    to_whole_number, validate_unit, Measurement, Quantity, DIVISION_SCALE,
};
pub use error::{NutritionError, NutritionResult};
pub use units::{lookup_unit, Unit, UnitGroup};
