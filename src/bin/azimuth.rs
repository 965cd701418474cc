//! Azimuth CLI binary.

use azimuth::cli::{args::*, commands::*};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments using clap
    let args = AzimuthArgs::parse();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
