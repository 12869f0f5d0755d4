//! Build information module
//!
//! Identifies the build that produced a report. JSON reports carry a
//! [`BuildInfo`] under `generator`, and the tools print it on startup.

use serde::Serialize;

use crate::nutrition::UnitGroup;

/// Build number, set by `build.rs`
pub const BUILD_NUMBER: u64 = match option_env!("NUTRICALC_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRICALC_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Version of the `{facts, totals}` JSON report shape.
/// Bump when a field is renamed or its meaning changes.
pub const REPORT_SCHEMA_VERSION: u32 = 2;

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// The program and build a report came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub report_schema: u32,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            report_schema: REPORT_SCHEMA_VERSION,
        }
    }

    /// e.g. "nutricalc 0.1.0 (build 12, 2026-10-19T08:00:00Z, report schema 2)"
    pub fn describe(&self) -> String {
        format!(
            "{} {} (build {}, {}, report schema {})",
            self.name, self.version, self.build_number, self.build_timestamp, self.report_schema
        )
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Supported units, e.g. "weight: mg g kg | energy: cal kcal"
pub fn unit_summary() -> String {
    [UnitGroup::Weight, UnitGroup::Energy]
        .iter()
        .map(|group| {
            let symbols: Vec<&str> = group.units().iter().map(|u| u.symbol()).collect();
            format!("{}: {}", group, symbols.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Print the startup banner to stderr
pub fn print_startup_banner(tool: &str) {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Nutrition Calculator - {}", tool);
    eprintln!("  {}", info.describe());
    eprintln!("  Units: {}", unit_summary());
    eprintln!("===============================================");
}
