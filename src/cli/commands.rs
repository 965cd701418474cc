//! Command implementations for the Azimuth CLI.

use std::fs;
use std::io::Read;

use serde_json::Value;

use crate::cli::args::*;
use crate::error::Result;
use crate::geo::geohash;
use crate::sort::points::parse_point_text;
use crate::sort::{
    ComparatorPlan, DeprecationWarnings, GeoDistanceSortBuilder, GeoFieldReader, ValueScope, plan,
};

/// Execute a CLI command.
pub fn execute_command(args: AzimuthArgs) -> Result<()> {
    match &args.command {
        Command::Explain(explain_args) => explain_sort(explain_args.clone(), &args),
        Command::Geohash(geohash_args) => run_geohash(geohash_args.clone(), &args),
    }
}

/// A reader with no documents, carrying only the capability flag; planning
/// never touches document values.
struct CapabilityOnlyReader {
    fast_field: bool,
}

impl GeoFieldReader for CapabilityOnlyReader {
    fn points(
        &self,
        _field: &str,
        _doc_id: u32,
        _scope: &ValueScope,
    ) -> Result<Vec<crate::geo::GeoPoint>> {
        Ok(Vec::new())
    }

    fn supports_distance_sort(&self, _field: &str) -> bool {
        self.fast_field
    }
}

/// Decode a sort clause and print its configuration and plan.
fn explain_sort(args: ExplainArgs, cli_args: &AzimuthArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let value: Value = serde_json::from_str(&input)?;
    let mut warnings = DeprecationWarnings::new();
    let sort = GeoDistanceSortBuilder::from_value(&value, &mut warnings)?;

    for warning in warnings.messages() {
        eprintln!("warning: {warning}");
    }

    if cli_args.verbosity() > 1 {
        println!("field: {}", sort.field());
        println!("points: {}", sort.points().len());
        println!("unit: {}", sort.unit());
        println!("distance_type: {}", sort.distance_type());
        println!("order: {}", sort.order());
        println!("mode: {}", sort.effective_sort_mode());
        println!("validation: {}", sort.validation());
    }

    let reader = CapabilityOnlyReader {
        fast_field: args.fast_field,
    };
    match plan(&sort, &reader)? {
        ComparatorPlan::NativeDistance { field, lat, lon } => {
            println!("plan: native distance sort on [{field}] from [{lat},{lon}]");
        }
        ComparatorPlan::ComputedDistance {
            field,
            points,
            distance_type,
            unit,
            mode,
            order,
            ..
        } => {
            println!(
                "plan: computed distance sort on [{field}], {} point(s), \
                 {distance_type} distances aggregated with {mode} in {unit}, {order}",
                points.len()
            );
        }
    }

    let encoded = if cli_args.pretty {
        serde_json::to_string_pretty(&sort.to_value())?
    } else {
        serde_json::to_string(&sort.to_value())?
    };
    println!("{encoded}");

    Ok(())
}

/// Decode geohash strings, or encode coordinates with `--encode`.
fn run_geohash(args: GeohashArgs, _cli_args: &AzimuthArgs) -> Result<()> {
    for value in &args.values {
        if args.encode {
            let point = parse_point_text("geohash", value)?;
            println!("{value} -> {}", geohash::encode(&point, args.precision));
        } else {
            let point = geohash::decode(value)?;
            println!("{value} -> {point}");
        }
    }
    Ok(())
}
