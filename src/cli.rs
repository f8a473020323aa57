use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "iam-mfa-audit",
    version,
    about = "MFA compliance auditor for cloud IAM users",
    long_about = "iam-mfa-audit checks every IAM user for console access and MFA enrollment, prints a compliance report and exports timestamped CSV and JSON results."
)]
pub struct Cli {
    /// Output format for standard output
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory for the CSV and JSON exports (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the report only, do not write export files
    #[arg(long)]
    pub no_export: bool,

    /// Audit an offline JSON inventory instead of the live IAM service
    #[arg(short, long, value_name = "FILE")]
    pub inventory: Option<PathBuf>,

    /// Named AWS profile to use
    #[arg(long, value_name = "NAME")]
    pub aws_profile: Option<String>,

    /// AWS region to use
    #[arg(long)]
    pub region: Option<String>,

    /// Number of users looked up concurrently
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Timeout in seconds for each provider call
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Treat failed console profile lookups as "no console access"
    #[arg(long)]
    pub lenient_console: bool,

    /// Strict mode: exit with 1 when any console user has no MFA
    #[arg(short, long)]
    pub strict: bool,

    /// CI mode: non-interactive output
    #[arg(long)]
    pub ci: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Path to a configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
