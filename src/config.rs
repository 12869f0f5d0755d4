//! Report configuration
//!
//! Output units and format for the command-line tools, read from the
//! environment.

use std::fmt;
use std::str::FromStr;

use crate::nutrition::{require_group, NutritionError, NutritionResult, Unit, UnitGroup};

/// Energy unit used in rendered reports
pub const ENV_ENERGY_UNIT: &str = "NUTRICALC_ENERGY_UNIT";
/// Weight unit used in rendered reports
pub const ENV_WEIGHT_UNIT: &str = "NUTRICALC_WEIGHT_UNIT";
/// One of `summary`, `json`, `html`
pub const ENV_FORMAT: &str = "NUTRICALC_FORMAT";

/// How reports are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
    Html,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Summary => "summary",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" | "text" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(NutritionError::InvalidArgument(format!(
                "unknown output format '{}' (expected summary, json or html)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units and format for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub energy_unit: Unit,
    pub weight_unit: Unit,
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            energy_unit: Unit::Kilocalorie,
            weight_unit: Unit::Gram,
            format: OutputFormat::Summary,
        }
    }
}

impl ReportConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> NutritionResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank values use defaults
    pub fn from_lookup<F>(lookup: F) -> NutritionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let energy_unit = match get(ENV_ENERGY_UNIT) {
            Some(v) => v.parse::<Unit>()?,
            None => defaults.energy_unit,
        };
        require_group(energy_unit, UnitGroup::Energy)?;

        let weight_unit = match get(ENV_WEIGHT_UNIT) {
            Some(v) => v.parse::<Unit>()?,
            None => defaults.weight_unit,
        };
        require_group(weight_unit, UnitGroup::Weight)?;

        let format = match get(ENV_FORMAT) {
            Some(v) => v.parse::<OutputFormat>()?,
            None => defaults.format,
        };

        Ok(Self {
            energy_unit,
            weight_unit,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ReportConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.energy_unit, Unit::Kilocalorie);
        assert_eq!(config.weight_unit, Unit::Gram);
        assert_eq!(config.format, OutputFormat::Summary);
    }

    #[test]
    fn test_reads_all_values() {
        let config = ReportConfig::from_lookup(lookup(&[
            (ENV_ENERGY_UNIT, "cal"),
            (ENV_WEIGHT_UNIT, "MG"),
            (ENV_FORMAT, "html"),
        ]))
        .unwrap();
        assert_eq!(config.energy_unit, Unit::Calorie);
        assert_eq!(config.weight_unit, Unit::Milligram);
        assert_eq!(config.format, OutputFormat::Html);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ReportConfig::from_lookup(lookup(&[(ENV_FORMAT, "  ")])).unwrap();
        assert_eq!(config.format, OutputFormat::Summary);
    }

    #[test]
    fn test_rejects_units_from_wrong_group() {
        let err = ReportConfig::from_lookup(lookup(&[(ENV_ENERGY_UNIT, "g")])).unwrap_err();
        assert!(matches!(err, NutritionError::InvalidUnit(_)));

        let err = ReportConfig::from_lookup(lookup(&[(ENV_WEIGHT_UNIT, "kcal")])).unwrap_err();
        assert!(matches!(err, NutritionError::InvalidUnit(_)));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let err = ReportConfig::from_lookup(lookup(&[(ENV_FORMAT, "pdf")])).unwrap_err();
        assert!(matches!(err, NutritionError::InvalidArgument(_)));
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }
}
