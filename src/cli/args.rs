//! Defines the command-line arguments for the gentest CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{GenConfig, NearMissPolicy};
use crate::discovery::FileOrder;
use crate::emit::EmitOptions;
use crate::syntax::GrammarConfig;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "gentest",
    version,
    about = "Generates a C test harness from annotated `int test_*` function headers."
)]
pub struct GenArgs {
    /// Directories containing the test sources.
    pub dirs: Vec<PathBuf>,

    /// Write the harness to this file instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail on lines that look like test headers but do not match the grammar.
    #[arg(long)]
    pub strict: bool,

    /// Required prefix of test-function names.
    #[arg(long, default_value = "test_")]
    pub prefix: String,

    /// Accepted return type of test functions (repeatable).
    #[arg(long = "return-type", value_name = "TOKEN", default_value = "int")]
    pub return_types: Vec<String>,

    /// Extension of candidate source files.
    #[arg(long, default_value = "c")]
    pub extension: String,

    /// Keep the raw directory-listing order instead of sorting files by name.
    #[arg(long)]
    pub listing_order: bool,

    /// Emit a harness that prints plain PASS/FAIL markers.
    #[arg(long)]
    pub no_color: bool,

    /// List the discovered test cases instead of generating the harness.
    #[arg(long)]
    pub list: bool,

    /// Print the listing as JSON.
    #[arg(long, requires = "list")]
    pub json: bool,
}

impl GenArgs {
    /// Builds the library configuration from the parsed flags.
    pub fn to_config(&self) -> GenConfig {
        GenConfig {
            grammar: GrammarConfig {
                prefix: self.prefix.clone(),
                return_types: self.return_types.clone(),
            },
            extension: self.extension.clone(),
            order: if self.listing_order {
                FileOrder::Listing
            } else {
                FileOrder::Sorted
            },
            emit: EmitOptions {
                color: !self.no_color,
            },
            near_misses: if self.strict {
                NearMissPolicy::Deny
            } else {
                NearMissPolicy::Warn
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_default_config() {
        let args = GenArgs::parse_from(["gentest", "tests"]);
        assert_eq!(args.dirs, vec![PathBuf::from("tests")]);
        assert_eq!(args.to_config(), GenConfig::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let args = GenArgs::parse_from([
            "gentest",
            "--strict",
            "--prefix",
            "check_",
            "--return-type",
            "int",
            "--return-type",
            "long",
            "--listing-order",
            "--no-color",
            "a",
            "b",
        ]);
        let config = args.to_config();
        assert_eq!(args.dirs.len(), 2);
        assert_eq!(config.near_misses, NearMissPolicy::Deny);
        assert_eq!(config.grammar.prefix, "check_");
        assert_eq!(config.grammar.return_types, ["int", "long"]);
        assert_eq!(config.order, FileOrder::Listing);
        assert!(!config.emit.color);
    }

    #[test]
    fn json_requires_list() {
        assert!(GenArgs::try_parse_from(["gentest", "--json", "tests"]).is_err());
        assert!(GenArgs::try_parse_from(["gentest", "--list", "--json", "tests"]).is_ok());
    }
}
