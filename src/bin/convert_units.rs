//! Command-line unit conversion
//! Usage: cargo run --bin convert_units -- <value[unit]> <target-unit> [default-unit]
//!        cargo run --bin convert_units -- --version
//!
//! Examples:
//!   convert_units 1500mg g        -> 1500 mg = 1.5 g
//!   convert_units 2.5 kcal cal    -> 2.5 kcal = 2500 cal

use tracing_subscriber::EnvFilter;

use nutricalc::build_info::{self, BuildInfo};
use nutricalc::nutrition::{parse_value_with_unit, NutritionError, NutritionResult, Unit};

const USAGE: &str = "Usage: convert_units <value[unit]> <target-unit> [default-unit]";

fn run(args: &[String]) -> NutritionResult<String> {
    let (input, target) = match args {
        [input, target] | [input, target, _] => (input, target),
        _ => return Err(NutritionError::InvalidArgument(USAGE.to_string())),
    };

    let default_unit = match args.get(2) {
        Some(unit) => Some(unit.parse::<Unit>()?),
        None => None,
    };
    let target = target.parse::<Unit>()?;

    let measurement = parse_value_with_unit(input, default_unit)?;
    let converted = measurement.to(target)?;

    tracing::debug!(input = %measurement, target = %target, "Converted value");
    Ok(format!("{} = {} {}", measurement, converted.normalize(), target))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutricalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", BuildInfo::current().describe());
        return Ok(());
    }

    build_info::print_startup_banner("convert_units");

    match run(&args) {
        Ok(line) => {
            println!("{}", line);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
