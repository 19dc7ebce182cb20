#![warn(missing_docs)]
//! Rankbench CLI Library
//!
//! CLI infrastructure for benchmark binaries. Build a [`Registry`], then
//! call [`run`] from `main` to get argument parsing, logging, orchestration
//! and root-rank reporting:
//!
//! ```ignore
//! use rankbench_core::{BenchmarkBuilder, Registry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register(
//!         BenchmarkBuilder::new("empty", |state| for _ in state.iter() {})
//!             .timing_root_rank()
//!             .no_iter_barrier(),
//!     );
//!     rankbench_cli::run(&registry)
//! }
//! ```

mod config;
mod executor;

pub use config::{DEFAULT_ITERATIONS, RunConfig};
pub use executor::{RunError, run_benchmarks};

use clap::Parser;
use rankbench_comm::{Communicator, SingleProcess};
use rankbench_core::Registry;
use rankbench_report::{OutputFormat, format_human_report, generate_json_report};
use regex::Regex;

/// Rankbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "rankbench")]
#[command(author, version, about = "rankbench - distributed micro-benchmark harness")]
pub struct Cli {
    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Iterations to run each benchmark for
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    /// List benchmarks without executing
    #[arg(long)]
    pub list: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Translate parsed arguments into a [`RunConfig`].
    pub fn to_run_config(&self) -> anyhow::Result<RunConfig> {
        let filter = if self.filter == ".*" {
            None
        } else {
            Some(Regex::new(&self.filter)?)
        };
        let format: OutputFormat = self
            .format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(RunConfig {
            iterations: self.iterations,
            format,
            filter,
        })
    }
}

/// Run the harness over a registry, single-process, with arguments from
/// the command line. This is the main entry point for benchmark binaries.
pub fn run(registry: &Registry) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(registry, &SingleProcess::new(), cli)
}

/// Run the harness over a registry against an explicit communicator, for
/// binaries launched under a multi-process runtime.
pub fn run_distributed(registry: &Registry, comm: &dyn Communicator) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(registry, comm, cli)
}

/// Run with pre-parsed arguments.
pub fn run_with_cli(registry: &Registry, comm: &dyn Communicator, cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("rankbench=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("rankbench=info")
            .init();
    }

    let config = cli.to_run_config()?;

    if cli.list {
        list_benchmarks(registry, &config);
        return Ok(());
    }

    let report = run_benchmarks(registry, comm, &config)?;

    // Only the root rank reports.
    if comm.is_root() {
        match config.format {
            OutputFormat::Human => print!("{}", format_human_report(&report)),
            OutputFormat::Json => println!("{}", generate_json_report(&report)?),
        }
    }

    Ok(())
}

fn list_benchmarks(registry: &Registry, config: &RunConfig) {
    let mut total = 0;
    for benchmark in registry.benchmarks() {
        if let Some(filter) = &config.filter {
            if !filter.is_match(benchmark.name()) {
                continue;
            }
        }
        println!("{}", benchmark.name());
        total += 1;
    }
    println!("{} benchmarks found.", total);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["rankbench"]);
        assert_eq!(cli.filter, ".*");
        assert_eq!(cli.format, "human");
        assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
        assert!(!cli.list);

        let config = cli.to_run_config().unwrap();
        assert!(config.filter.is_none());
        assert_eq!(config.format, OutputFormat::Human);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["rankbench", "ping.*", "--format", "json", "-n", "500"]);
        let config = cli.to_run_config().unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.filter.unwrap().is_match("pingpong"));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let cli = Cli::parse_from(["rankbench", "--format", "csv"]);
        assert!(cli.to_run_config().is_err());
    }
}
