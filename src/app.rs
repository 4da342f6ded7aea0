//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments into a `PipelineConfig`
//! - runs the derive pipeline or the validator
//! - prints the terminal summary

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, RunArgs};
use crate::domain::PipelineConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `insights` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // A bare `insights` behaves like `insights run`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Validate(args) => pipeline::run_validate(&args.data).map(|_| ()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout carries only the summary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = pipeline_config_from_args(&args);
    let run = pipeline::run_derive(&config)?;

    if config.print_summary {
        println!("{}", crate::report::format_run_summary(&run));
    }
    Ok(())
}

pub fn pipeline_config_from_args(args: &RunArgs) -> PipelineConfig {
    PipelineConfig {
        data_path: args.input.data.clone(),
        derived_out: args.derived_out.clone(),
        payload_out: args.payload_out.clone(),
        appendix_out: args.appendix_out.clone(),
        print_summary: !args.quiet,
    }
}

/// Rewrite argv so `insights` defaults to `insights run`.
///
/// Rules:
/// - `insights`                      -> `insights run`
/// - `insights --data x.csv ...`     -> `insights run --data x.csv ...`
/// - `insights --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs() {
        assert_eq!(rewrite_args(args(&["insights"])), args(&["insights", "run"]));
    }

    #[test]
    fn leading_flags_are_run_flags() {
        assert_eq!(
            rewrite_args(args(&["insights", "-q"])),
            args(&["insights", "run", "-q"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(args(&["insights", "--help"])), args(&["insights", "--help"]));
        assert_eq!(
            rewrite_args(args(&["insights", "validate"])),
            args(&["insights", "validate"])
        );
    }
}
