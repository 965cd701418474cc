//! Command line argument parsing for the Azimuth CLI using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Azimuth - geo-distance sorting for search indexes
#[derive(Parser, Debug, Clone)]
#[command(name = "azimuth")]
#[command(about = "Geo-distance sorting for search indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AzimuthArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AzimuthArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Decode a sort clause and explain the chosen comparator plan
    Explain(ExplainArgs),

    /// Decode geohash strings, or encode a coordinate
    Geohash(GeohashArgs),
}

/// Arguments for the explain command
#[derive(Parser, Debug, Clone)]
pub struct ExplainArgs {
    /// File holding the sort clause JSON (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Treat the sort field as supporting native distance ordering
    #[arg(long)]
    pub fast_field: bool,
}

/// Arguments for the geohash command
#[derive(Parser, Debug, Clone)]
pub struct GeohashArgs {
    /// Geohash strings to decode, or "lat,lon" coordinates with --encode
    pub values: Vec<String>,

    /// Encode coordinates instead of decoding geohashes
    #[arg(long)]
    pub encode: bool,

    /// Geohash precision used with --encode
    #[arg(long, default_value_t = 12)]
    pub precision: usize,
}
