//! The gentest Command-Line Interface.
//!
//! This module is the main entry point for the CLI and orchestrates the library
//! pipeline: collect files, scan headers, render the harness.

use std::process;

use clap::{CommandFactory, Parser};
use termcolor::ColorChoice;

use crate::{engine::HarnessPipeline, GenError};

pub mod args;
pub mod output;

pub use args::GenArgs;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = GenArgs::parse();

    if args.dirs.is_empty() {
        print_usage();
        process::exit(1);
    }

    if let Err(e) = execute(&args) {
        print_error(e);
        process::exit(1);
    }
}

/// Runs one invocation with already parsed arguments.
pub fn execute(args: &GenArgs) -> Result<(), GenError> {
    let pipeline = HarnessPipeline::new(args.to_config())?;

    if args.list {
        let report = pipeline.discover(&args.dirs)?;
        if args.json {
            let json = output::cases_to_json(&report.cases)?;
            return output::write_stdout(&format!("{}\n", json));
        }
        return output::print_cases(&report.cases, stdout_color_choice());
    }

    let harness = pipeline.generate(&args.dirs)?;
    match &args.output {
        Some(path) => output::write_file(path, &harness),
        None => output::write_stdout(&harness),
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Usage goes to stdout, like the rest of the tool's regular output.
fn print_usage() {
    let mut command = GenArgs::command();
    println!("{}", command.render_usage());
    println!("\nAt least one directory containing test sources is required.");
}

/// Colors only when stdout is a terminal; pipes and files get plain text.
fn stdout_color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints a GenError with full miette diagnostics
pub fn print_error(error: GenError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
