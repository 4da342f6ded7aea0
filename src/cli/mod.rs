//! Command-line parsing for the housing panel derivation tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analytics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "insights", version, about = "Derived analytics for a region × year housing panel")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive metrics, the rent regression and headlines, then write all artifacts.
    Run(RunArgs),
    /// Check the input table's schema, keys and sanity bounds.
    Validate(DataArgs),
}

/// Location of the source panel.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Source CSV (`year, borough, median_rent, median_income, subway_access_score, air_quality_index`).
    #[arg(long, env = "INSIGHTS_DATA", default_value = "data/nyc_median_rent.csv")]
    pub data: PathBuf,
}

/// Options for a derive run.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: DataArgs,

    /// Derived summary JSON.
    #[arg(long, env = "INSIGHTS_DERIVED_OUT", default_value = "data/derived_summary.json")]
    pub derived_out: PathBuf,

    /// Visualization payload JSON.
    #[arg(long, env = "INSIGHTS_PAYLOAD_OUT", default_value = "data/viz_payload.json")]
    pub payload_out: PathBuf,

    /// Markdown OLS appendix.
    #[arg(long, env = "INSIGHTS_APPENDIX_OUT", default_value = "appendix/ols_report.md")]
    pub appendix_out: PathBuf,

    /// Skip the terminal summary.
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_override_defaults() {
        let cli = Cli::parse_from(["insights", "run", "--data", "in.csv", "--payload-out", "p.json", "-q"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input.data, PathBuf::from("in.csv"));
        assert_eq!(args.payload_out, PathBuf::from("p.json"));
        assert!(args.quiet);
    }
}
