//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for admission results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Formatted console output
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for cohort
#[derive(Parser, Debug)]
#[command(name = "cohort")]
#[command(version, about = "Group consultation admission engine")]
#[command(long_about = r#"
Cohort places completed patient questionnaires into group consultation
sessions: each report is categorized, scored for urgency, assigned a
clinician, and admitted into an open compatible group (or a new one).

The input file is a JSON array of questionnaire reports. All reports are
admitted concurrently against an in-memory store, demonstrating the
engine's concurrency-safe capacity handling.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./cohort.toml       Project-level config
3. ~/.config/cohort/config.toml   Global config

Example:
  cohort reports.json
  cohort reports.json --summary
  cohort reports.json -o json --no-config
"#)]
pub struct Cli {
    /// Path to a JSON file with an array of questionnaire reports
    pub reports: Option<PathBuf>,

    /// Print the clinician-facing summary for each resulting group
    #[arg(short, long)]
    pub summary: bool,

    /// Print each clinician's scheduled groups with occupancy
    #[arg(long)]
    pub schedule: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
